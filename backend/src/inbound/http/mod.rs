//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod immutable_drawings;
pub mod mutable_drawings;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route on a scope or app.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::current_user)
        .service(users::authenticate)
        .service(users::logout)
        .service(immutable_drawings::publish_drawing)
        .service(immutable_drawings::get_published_drawing)
        .configure(mutable_drawings::configure);
}

/// JSON extractor settings rendering body errors with the shared schema.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(validation::json_error_handler)
}
