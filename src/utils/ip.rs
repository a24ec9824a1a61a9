//! Client address extraction.
//!
//! Uses actix's connection info, which honors `Forwarded`/`X-Forwarded-For`
//! from the reverse proxy. The result keys the rate limiter and is stored on
//! click records.

use std::net::SocketAddr;

use actix_web::dev::ConnectionInfo;

/// Best-effort client IP, without the port. Falls back to "unknown" when the
/// transport has no peer address (unit tests, some tunnels).
pub fn client_ip(conn: &ConnectionInfo) -> String {
    match conn.realip_remote_addr() {
        Some(addr) => match addr.parse::<SocketAddr>() {
            Ok(socket) => socket.ip().to_string(),
            Err(_) => addr.to_string(),
        },
        None => "unknown".to_string(),
    }
}
