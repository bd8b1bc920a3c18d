use async_trait::async_trait;
use pinnwand_common::model::{
    Id, ModelValidationError,
    auth::{AuthTokenHash, Authentication},
    like::Like,
    post::{Post, PostMarker},
    user::UserMarker,
};
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Outcome of inserting a like.
///
/// `AlreadyExists` is the store refusing a second like for the same pair, which is how a
/// racing duplicate surfaces even after the caller checked `find_like`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum LikeInsertion {
    Inserted,
    AlreadyExists,
}

/// Everything the API needs from persistent storage.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_post_by_id(&self, post_id: Id<PostMarker>) -> Result<Option<Post>>;

    /// All likes currently on the post. Empty if the post doesn't exist.
    async fn find_post_likes(&self, post_id: Id<PostMarker>) -> Result<Vec<Like>>;

    async fn find_like(
        &self,
        post_id: Id<PostMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Option<Like>>;

    async fn insert_like(&self, like: Like) -> Result<LikeInsertion>;

    /// Returns whether a like was actually removed.
    async fn delete_like(&self, like: Like) -> Result<bool>;

    async fn find_authentication(
        &self,
        token_hash: &AuthTokenHash,
    ) -> Result<Option<Authentication>>;
}
