use crate::model::{Id, post::PostMarker, user::UserMarker};
use serde::{Deserialize, Serialize};

/// A user endorsing a post. The pair is the whole identity; there is at most one per pair.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
pub struct Like {
    pub post: Id<PostMarker>,
    pub user: Id<UserMarker>,
}

impl Like {
    #[must_use]
    pub fn new(post: Id<PostMarker>, user: Id<UserMarker>) -> Self {
        Self { post, user }
    }
}
