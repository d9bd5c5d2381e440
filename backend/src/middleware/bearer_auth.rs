//! Bearer-token authentication middleware.
//!
//! Resolves the caller from `Authorization: Bearer <token>`, falling back to
//! the legacy `x-auth-token` header, and stores the verified
//! [`AuthenticatedUser`] in the request extensions. Requests without a usable
//! token never reach the wrapped service; they are answered directly with a
//! 401 error body.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::AccessTokenVerifier;
use crate::domain::{Error, UserId};

/// Legacy header carrying a bare token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
/// Message returned when the request carries no token.
pub const MISSING_TOKEN: &str = "No token, authorization denied";
/// Message returned when the token fails verification.
pub const INVALID_TOKEN: &str = "Token is not valid";

/// The user a request was authenticated as.
///
/// Handlers take it as an extractor; it is only available behind
/// [`BearerAuth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Wrap a verified user id.
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    /// The verified user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| Error::unauthorized(MISSING_TOKEN)))
    }
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);
    let legacy = || {
        headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
    };
    bearer
        .filter(|token| !token.is_empty())
        .or_else(|| legacy().filter(|token| !token.is_empty()))
}

/// Authentication middleware verifying bearer tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::App;
/// use postboard::domain::ports::FixtureAccessTokenVerifier;
/// use postboard::middleware::BearerAuth;
///
/// let _app = App::new().wrap(BearerAuth::new(Arc::new(FixtureAccessTokenVerifier)));
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl BearerAuth {
    /// Build the middleware around a token verifier.
    pub fn new(verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessTokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        // Errors are built inside the future so they pick up the trace id.
        Box::pin(async move {
            let Some(token) = extract_token(req.headers()) else {
                debug!(path = req.path(), "request without token rejected");
                let error = Error::unauthorized(MISSING_TOKEN);
                return Ok(req.error_response(error).map_into_right_body());
            };
            let user_id = match verifier.verify(token) {
                Ok(user_id) => user_id,
                Err(err) => {
                    debug!(path = req.path(), error = %err, "token rejected");
                    let error = Error::unauthorized(INVALID_TOKEN);
                    return Ok(req.error_response(error).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthenticatedUser::new(user_id));
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

#[cfg(test)]
#[path = "bearer_auth_tests.rs"]
mod tests;
