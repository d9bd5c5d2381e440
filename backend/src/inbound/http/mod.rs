//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod engagement;
pub mod error;
pub mod health;
pub mod posts;
pub mod posts_dto;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings: malformed bodies become `invalid_request` errors
/// instead of Actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into())
}

/// Register the posts API handlers on a service config.
///
/// The caller decides the mount point and wraps it with
/// [`BearerAuth`](crate::middleware::BearerAuth).
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use postboard::domain::ports::FixtureAccessTokenVerifier;
/// use postboard::inbound::http::configure_posts_api;
/// use postboard::middleware::BearerAuth;
///
/// let _app = App::new().service(
///     web::scope("/api/v1")
///         .wrap(BearerAuth::new(Arc::new(FixtureAccessTokenVerifier)))
///         .configure(configure_posts_api),
/// );
/// ```
pub fn configure_posts_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(posts::create_post)
        .service(posts::list_posts)
        .service(posts::get_post)
        .service(posts::delete_post)
        .service(engagement::like_post)
        .service(engagement::dislike_post)
        .service(engagement::add_comment)
        .service(engagement::delete_comment);
}
