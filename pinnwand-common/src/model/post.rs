use crate::model::{
    Id,
    like::Like,
    user::{User, UserMarker},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author: User,
    pub content: String,
    pub images: Vec<PostImage>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostImage {
    pub url: String,
}

/// A post as shown to a particular viewer.
///
/// Built fresh for every read from the post and the likes loaded alongside it,
/// so the count is never older than the query that produced `likes`.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct PostView {
    pub id: Id<PostMarker>,
    pub author: User,
    pub content: String,
    pub images: Vec<PostImage>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub like_count: u64,
    pub is_liked_by_current_user: bool,
}

impl PostView {
    /// `likes` must be every like currently referencing `post`.
    /// An anonymous viewer (`None`) has never liked anything.
    #[must_use]
    pub fn assemble(post: Post, likes: &[Like], viewer: Option<Id<UserMarker>>) -> Self {
        let is_liked_by_current_user =
            viewer.is_some_and(|viewer| likes.iter().any(|like| like.user == viewer));

        Self {
            id: post.id,
            author: post.author,
            content: post.content,
            images: post.images,
            created_at: post.created_at,
            like_count: likes.len() as u64,
            is_liked_by_current_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Id,
        like::Like,
        post::{Post, PostImage, PostView},
        user::{User, UserHandle},
    };
    use time::macros::datetime;

    fn post() -> Post {
        Post {
            id: Id::new(1),
            author: User {
                id: Id::new(10),
                handle: UserHandle::new("author".to_owned()).unwrap(),
            },
            content: "hello".to_owned(),
            images: vec![PostImage {
                url: "https://img.example/1.png".to_owned(),
            }],
            created_at: datetime!(2025-10-24 10:00 UTC),
        }
    }

    #[test]
    fn no_likes() {
        let view = PostView::assemble(post(), &[], Some(Id::new(20)));

        assert_eq!(view.like_count, 0);
        assert!(!view.is_liked_by_current_user);
        assert_eq!(view.id, Id::new(1));
        assert_eq!(view.images.len(), 1);
    }

    #[test]
    fn viewer_among_likers() {
        let likes = [
            Like::new(Id::new(1), Id::new(20)),
            Like::new(Id::new(1), Id::new(30)),
        ];

        let liker = PostView::assemble(post(), &likes, Some(Id::new(30)));
        assert_eq!(liker.like_count, 2);
        assert!(liker.is_liked_by_current_user);

        let bystander = PostView::assemble(post(), &likes, Some(Id::new(40)));
        assert_eq!(bystander.like_count, 2);
        assert!(!bystander.is_liked_by_current_user);
    }

    #[test]
    fn anonymous_viewer() {
        let likes = [Like::new(Id::new(1), Id::new(20))];

        let view = PostView::assemble(post(), &likes, None);

        assert_eq!(view.like_count, 1);
        assert!(!view.is_liked_by_current_user);
    }

    #[test]
    fn assemble_is_deterministic() {
        let likes = [Like::new(Id::new(1), Id::new(20))];

        assert_eq!(
            PostView::assemble(post(), &likes, Some(Id::new(20))),
            PostView::assemble(post(), &likes, Some(Id::new(20)))
        );
    }

    #[test]
    fn view_json_shape() {
        let view = PostView::assemble(post(), &[], None);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["like_count"], 0);
        assert_eq!(json["is_liked_by_current_user"], false);
        assert_eq!(json["author"]["handle"], "author");
        assert_eq!(json["created_at"], "2025-10-24T10:00:00Z");
    }
}
