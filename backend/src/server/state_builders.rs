//! Wire services onto the configured storage.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use postboard::domain::ports::{PostRepository, UserDirectory};
use postboard::domain::{EngagementService, PostService};
use postboard::inbound::http::state::{HttpState, HttpStatePorts};
use postboard::outbound::persistence::{DieselPostRepository, DieselUserDirectory};

use super::config::Storage;

fn state_for<R, U>(posts: Arc<R>, users: Arc<U>) -> HttpState
where
    R: PostRepository + 'static,
    U: UserDirectory + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let post_service = Arc::new(PostService::new(
        Arc::clone(&posts),
        Arc::clone(&users),
        Arc::clone(&clock),
    ));
    HttpState::new(HttpStatePorts {
        posts: post_service.clone(),
        posts_query: post_service,
        engagement: Arc::new(EngagementService::new(posts, users, clock)),
    })
}

/// Build handler state backed by `storage`.
pub(crate) fn build_http_state(storage: &Storage) -> HttpState {
    match storage {
        Storage::Postgres(pool) => state_for(
            Arc::new(DieselPostRepository::new(pool.clone())),
            Arc::new(DieselUserDirectory::new(pool.clone())),
        ),
        Storage::Memory { posts, users } => state_for(Arc::clone(posts), Arc::clone(users)),
    }
}
