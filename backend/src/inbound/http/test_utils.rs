//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde::de::DeserializeOwned;

use crate::domain::Error;
use crate::domain::ports::{
    EngagementCommand, FixtureAccessTokenVerifier, MockEngagementCommand, MockPostsCommand,
    MockPostsQuery, PostsCommand, PostsQuery,
};
use crate::domain::UserId;
use crate::inbound::http::configure_posts_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::middleware::{BearerAuth, Trace};

/// Ports for a handler test; unset ports are strict mocks expecting nothing.
pub struct TestPorts {
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub engagement: Arc<dyn EngagementCommand>,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            posts: Arc::new(MockPostsCommand::new()),
            posts_query: Arc::new(MockPostsQuery::new()),
            engagement: Arc::new(MockEngagementCommand::new()),
        }
    }
}

/// Build an app mounting the posts API at `/api/v1`, authenticating with
/// [`FixtureAccessTokenVerifier`] so any UUID works as a bearer token.
pub async fn init_api(
    ports: TestPorts,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let state = HttpState::new(HttpStatePorts {
        posts: ports.posts,
        posts_query: ports.posts_query,
        engagement: ports.engagement,
    });
    test::init_service(
        App::new().app_data(web::Data::new(state)).wrap(Trace).service(
            web::scope("/api/v1")
                .wrap(BearerAuth::new(Arc::new(FixtureAccessTokenVerifier)))
                .configure(configure_posts_api),
        ),
    )
    .await
}

/// Attach `user` as the bearer token.
pub fn as_user(req: test::TestRequest, user: &UserId) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {user}")))
}

/// Call the app and decode the JSON body, asserting the status first.
pub async fn call_json<S, B, T>(
    app: &S,
    req: test::TestRequest,
    status: actix_web::http::StatusCode,
) -> T
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
    T: DeserializeOwned,
{
    let res = test::call_service(app, req.to_request()).await;
    assert_eq!(res.status(), status);
    test::read_body_json(res).await
}

/// Call the app expecting a 400 with a domain error body.
pub async fn call_error<S, B>(app: &S, req: test::TestRequest) -> Error
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    call_json(app, req, actix_web::http::StatusCode::BAD_REQUEST).await
}
