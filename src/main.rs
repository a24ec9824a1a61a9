use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware::from_fn, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use impactclick::admission::{AdmissionControl, FixedWindowLimiter};
use impactclick::api::middleware::{ApiToken, AuthMiddleware, RateLimitMiddleware};
use impactclick::api::{AnalyticsApi, AppStartTime, ClickApi, DonationApi, HealthApi, NgoApi};
use impactclick::config::Config;
use impactclick::services::{
    verifier_from_secret, AnalyticsService, ClickService, DonationService, MockPaymentProcessor,
    NgoService, Sealer,
};
use impactclick::storages::StorageFactory;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let storage = StorageFactory::create().map_err(std::io::Error::other)?;
    info!("Using storage backend: {}", storage.get_backend_name().await);

    let sealer = Sealer::new(config.encryption_key.as_bytes()).map_err(std::io::Error::other)?;

    let verifier = verifier_from_secret(config.recaptcha_secret.as_deref());
    if config.recaptcha_secret.is_none() {
        info!("Bot verification is disabled (RECAPTCHA_SECRET_KEY not set)");
    }

    if config.api_token.is_empty() {
        info!("Authenticated API is disabled (API_TOKEN not set)");
    }

    let limiter: Arc<dyn AdmissionControl> = Arc::new(FixedWindowLimiter::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    let click_service = web::Data::new(ClickService::new(
        storage.clone(),
        verifier,
        config.recaptcha_min_score,
    ));
    let donation_service = web::Data::new(DonationService::new(
        storage.clone(),
        Arc::new(MockPaymentProcessor),
        sealer,
        config.default_currency.clone(),
    ));
    let analytics_service = web::Data::new(AnalyticsService::new(storage.clone()));
    let ngo_service = web::Data::new(NgoService::new(storage.clone()));

    let storage_data = web::Data::new(storage);
    let limiter_data = web::Data::new(limiter);
    let api_token = web::Data::new(ApiToken(config.api_token.clone()));
    let start_time_data = web::Data::new(app_start_time);

    let bind_address = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server at http://{}", bind_address);

    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        let cors = if allowed_origins.is_empty() {
            // No allow-list configured: browsers only, same-origin.
            Cors::default()
        } else {
            allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600)
        };

        App::new()
            .app_data(storage_data.clone())
            .app_data(limiter_data.clone())
            .app_data(api_token.clone())
            .app_data(start_time_data.clone())
            .app_data(click_service.clone())
            .app_data(donation_service.clone())
            .app_data(analytics_service.clone())
            .app_data(ngo_service.clone())
            .wrap(cors)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/click")
                            .wrap(from_fn(RateLimitMiddleware::admit))
                            .route(web::post().to(ClickApi::register)),
                    )
                    .service(
                        web::scope("/donation")
                            .wrap(from_fn(AuthMiddleware::bearer_auth))
                            .route("", web::post().to(DonationApi::settle)),
                    )
                    .service(
                        web::scope("/analytics")
                            .wrap(from_fn(AuthMiddleware::bearer_auth))
                            .route("", web::get().to(AnalyticsApi::get_analytics))
                            .route("/time-series", web::get().to(AnalyticsApi::time_series)),
                    )
                    .service(
                        web::scope("/ngos")
                            .wrap(from_fn(AuthMiddleware::bearer_auth))
                            .route("", web::post().to(NgoApi::create))
                            .route("", web::get().to(NgoApi::list))
                            .route("/{id}", web::get().to(NgoApi::get))
                            .route("/{id}", web::put().to(NgoApi::update))
                            .route("/{id}", web::delete().to(NgoApi::delete)),
                    ),
            )
            .route("/health", web::get().to(HealthApi::health_check))
    })
    .bind(bind_address)?
    .run()
    .await
}
