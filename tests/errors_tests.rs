use actix_web::http::StatusCode;
use impactclick::errors::ImpactClickError;

#[test]
fn test_validation_error() {
    let error = ImpactClickError::validation("amount must be positive");

    assert!(matches!(error, ImpactClickError::Validation(_)));
    assert_eq!(error.code(), "E001");
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert!(error.to_string().contains("Validation Error"));
    assert!(error.to_string().contains("amount must be positive"));
}

#[test]
fn test_protocol_failures_map_to_400() {
    for error in [
        ImpactClickError::invalid_verification("bad token"),
        ImpactClickError::duplicate_click("dup"),
        ImpactClickError::invalid_reference("unknown campaign"),
        ImpactClickError::invalid_pledge("unknown pledge"),
        ImpactClickError::already_settled("done"),
    ] {
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(error.is_public());
    }
}

#[test]
fn test_rate_limited_maps_to_429() {
    let error = ImpactClickError::rate_limited("slow down");
    assert_eq!(error.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(error.code(), "E007");
}

#[test]
fn test_unauthorized_maps_to_401() {
    let error = ImpactClickError::unauthorized("bad token");
    assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_not_found_maps_to_404() {
    let error = ImpactClickError::not_found("NGO x not found");
    assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
}

#[test]
fn test_internal_failures_are_opaque() {
    for error in [
        ImpactClickError::sealing("cipher failure"),
        ImpactClickError::storage("disk full"),
        ImpactClickError::serialization("bad json"),
        ImpactClickError::internal("surprise"),
    ] {
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.is_public());
    }
}

#[test]
fn test_from_impls() {
    let io_err = std::io::Error::other("boom");
    let error: ImpactClickError = io_err.into();
    assert!(matches!(error, ImpactClickError::Storage(_)));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: ImpactClickError = json_err.into();
    assert!(matches!(error, ImpactClickError::Serialization(_)));
}

#[test]
fn test_error_codes_are_distinct() {
    let errors = [
        ImpactClickError::validation(""),
        ImpactClickError::invalid_verification(""),
        ImpactClickError::duplicate_click(""),
        ImpactClickError::invalid_reference(""),
        ImpactClickError::invalid_pledge(""),
        ImpactClickError::already_settled(""),
        ImpactClickError::rate_limited(""),
        ImpactClickError::unauthorized(""),
        ImpactClickError::not_found(""),
        ImpactClickError::sealing(""),
        ImpactClickError::storage(""),
        ImpactClickError::serialization(""),
        ImpactClickError::internal(""),
    ];

    let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}
