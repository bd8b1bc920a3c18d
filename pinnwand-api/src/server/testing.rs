use crate::server::{ServerState, routes};
use axum_test::TestServer;
use pinnwand_common::model::{
    Id,
    auth::{AuthToken, Authentication},
    post::{Post, PostImage, PostMarker},
    user::{User, UserHandle, UserMarker},
};
use pinnwand_db::memory::MemoryStore;
use std::sync::Arc;
use time::{Duration, OffsetDateTime, macros::datetime};

pub const POST: Id<PostMarker> = Id::new(1);
pub const OWNER: Id<UserMarker> = Id::new(10);
pub const VIEWER: Id<UserMarker> = Id::new(20);

/// The full router over a memory store holding post 1, written by user 10.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_post(Post {
                id: POST,
                author: user(OWNER, "owner"),
                content: "Hello there".to_owned(),
                images: vec![PostImage {
                    url: "https://img.example/1.png".to_owned(),
                }],
                created_at: datetime!(2025-10-24 10:00 UTC),
            })
            .await;
        store.insert_user(user(VIEWER, "viewer")).await;

        let state = ServerState {
            repository: store.clone(),
        };
        let server = TestServer::new(routes().with_state(state)).unwrap();

        Self { server, store }
    }

    /// Stores a fresh session for `user` and returns its bearer token.
    pub async fn login(&self, user: Id<UserMarker>) -> String {
        self.login_until(user, None).await
    }

    pub async fn login_expired(&self, user: Id<UserMarker>) -> String {
        self.login_until(user, Some(OffsetDateTime::now_utc() - Duration::minutes(1)))
            .await
    }

    async fn login_until(
        &self,
        user: Id<UserMarker>,
        expires_at: Option<OffsetDateTime>,
    ) -> String {
        let token = AuthToken::generate_random();
        self.store
            .insert_authentication(Authentication {
                user,
                token_hash: token.hash().unwrap(),
                created_at: OffsetDateTime::now_utc() - Duration::hours(1),
                expires_at,
            })
            .await;

        token.as_token_str()
    }
}

fn user(id: Id<UserMarker>, handle: &str) -> User {
    User {
        id,
        handle: UserHandle::new(handle.to_owned()).unwrap(),
    }
}
