//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EngagementCommand, PostsCommand, PostsQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub engagement: Arc<dyn EngagementCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub engagement: Arc<dyn EngagementCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use postboard::domain::{EngagementService, PostService};
    /// use postboard::domain::ports::{FixturePostRepository, FixtureUserDirectory};
    /// use postboard::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let repo = Arc::new(FixturePostRepository);
    /// let users = Arc::new(FixtureUserDirectory);
    /// let posts = Arc::new(PostService::new(repo.clone(), users.clone(), Arc::new(DefaultClock)));
    /// let state = HttpState::new(HttpStatePorts {
    ///     posts: posts.clone(),
    ///     posts_query: posts,
    ///     engagement: Arc::new(EngagementService::new(repo, users, Arc::new(DefaultClock))),
    /// });
    /// let _engagement = state.engagement.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            posts,
            posts_query,
            engagement,
        } = ports;
        Self {
            posts,
            posts_query,
            engagement,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
