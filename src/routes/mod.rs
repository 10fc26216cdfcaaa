// Route exports
pub mod recommend;

use actix_web::{error, web, HttpRequest};

use crate::config::ServerSettings;
use crate::error::MatchError;

pub use recommend::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(recommend::configure);
}

/// Register shared state, body limits and routes on an app
///
/// Used by the server and by route tests so both see the same extractors.
pub fn configure_app(
    state: AppState,
    server: &ServerSettings,
) -> impl FnOnce(&mut web::ServiceConfig) {
    let max_body_bytes = server.max_body_bytes;
    let max_upload_bytes = server.max_upload_bytes;

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(
                web::JsonConfig::default()
                    .limit(max_body_bytes)
                    .error_handler(handle_json_payload_error),
            )
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PayloadConfig::new(max_upload_bytes));
        configure_routes(cfg);
    }
}

/// Handle JSON payload errors
///
/// Oversized bodies become 413, anything else that fails to parse is a 400.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    match err {
        error::JsonPayloadError::Overflow { limit }
        | error::JsonPayloadError::OverflowKnownLength { limit, .. } => {
            MatchError::PayloadTooLarge(format!("Request body exceeds {} bytes", limit)).into()
        }
        other => MatchError::Validation(format!("Invalid JSON: {}", other)).into(),
    }
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    MatchError::Validation(format!("Invalid query: {}", err)).into()
}
