use crate::server::ServerRouter;

mod post_likes;
mod posts;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(post_likes::routes())
        .merge(posts::routes())
}
