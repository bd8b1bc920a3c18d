use crate::{
    likes,
    server::{Result, ServerError, ServerRouter, auth::AuthenticatedUser, json::Json},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use pinnwand_common::model::{Id, post::PostMarker};
use pinnwand_db::repository::Repository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(like_post)
        .typed_delete(unlike_post)
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/post-likes/{post_id}/like", rejection(ServerError))]
struct LikePostPath {
    post_id: Id<PostMarker>,
}

async fn like_post(
    LikePostPath { post_id }: LikePostPath,
    State(repository): State<Arc<dyn Repository>>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    likes::like(repository.as_ref(), post_id, user.user_id()).await?;
    info!(%post_id, user_id = %user.user_id(), "Post liked");

    Ok(Json(MessageResponse {
        message: "Post liked successfully",
    }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/post-likes/{post_id}/unlike", rejection(ServerError))]
struct UnlikePostPath {
    post_id: Id<PostMarker>,
}

async fn unlike_post(
    UnlikePostPath { post_id }: UnlikePostPath,
    State(repository): State<Arc<dyn Repository>>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    likes::unlike(repository.as_ref(), post_id, user.user_id()).await?;
    info!(%post_id, user_id = %user.user_id(), "Post unliked");

    Ok(Json(MessageResponse {
        message: "Post unliked successfully",
    }))
}
