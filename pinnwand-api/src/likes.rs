//! Liking and unliking posts.
//!
//! Both operations take the store handle explicitly and perform at most one write.

use pinnwand_common::model::{Id, like::Like, post::PostMarker, user::UserMarker};
use pinnwand_db::repository::{DbError, LikeInsertion, Repository};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LikeError {
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("User {} tried to like their own post {}.", .0.user, .0.post)]
    OwnPost(Like),
    #[error("User {} already likes post {}.", .0.user, .0.post)]
    AlreadyLiked(Like),
    #[error("User {} has no like on post {}.", .0.user, .0.post)]
    LikeNotFound(Like),
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Checks, in order: the post exists, the user isn't its author, the user doesn't like it yet.
pub async fn like(
    repository: &dyn Repository,
    post_id: Id<PostMarker>,
    user_id: Id<UserMarker>,
) -> Result<(), LikeError> {
    let post = repository
        .find_post_by_id(post_id)
        .await?
        .ok_or(LikeError::PostNotFound(post_id))?;

    let like = Like::new(post_id, user_id);

    if post.author.id == user_id {
        return Err(LikeError::OwnPost(like));
    }

    if repository.find_like(post_id, user_id).await?.is_some() {
        return Err(LikeError::AlreadyLiked(like));
    }

    match repository.insert_like(like).await? {
        LikeInsertion::Inserted => Ok(()),
        LikeInsertion::AlreadyExists => {
            debug!(%post_id, %user_id, "Concurrent like won the insert");
            Err(LikeError::AlreadyLiked(like))
        }
    }
}

pub async fn unlike(
    repository: &dyn Repository,
    post_id: Id<PostMarker>,
    user_id: Id<UserMarker>,
) -> Result<(), LikeError> {
    let like = repository
        .find_like(post_id, user_id)
        .await?
        .ok_or(LikeError::LikeNotFound(Like::new(post_id, user_id)))?;

    if repository.delete_like(like).await? {
        Ok(())
    } else {
        debug!(%post_id, %user_id, "Concurrent unlike won the delete");
        Err(LikeError::LikeNotFound(like))
    }
}
