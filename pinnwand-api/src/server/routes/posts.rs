use crate::server::{Result, ServerError, ServerRouter, auth::AuthenticatedUser, json::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use pinnwand_common::model::{
    Id,
    post::{PostMarker, PostView},
};
use pinnwand_db::repository::Repository;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(get_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{post_id}", rejection(ServerError))]
struct GetPostPath {
    post_id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { post_id }: GetPostPath,
    State(repository): State<Arc<dyn Repository>>,
    viewer: Option<AuthenticatedUser>,
) -> Result<Json<PostView>> {
    let post = repository
        .find_post_by_id(post_id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(post_id))?;
    let likes = repository.find_post_likes(post_id).await?;

    Ok(Json(PostView::assemble(
        post,
        &likes,
        viewer.map(AuthenticatedUser::user_id),
    )))
}
