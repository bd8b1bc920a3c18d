use pinnwand_common::model::{
    Id, ModelValidationError,
    auth::Authentication,
    like::Like,
    post::{Post, PostImage},
    user::{User, UserHandle},
};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct FullPostRecord {
    pub post_id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub user_id: i64,
    pub handle: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct PostImageRecord {
    pub url: String,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct LikeRecord {
    pub post_id: i64,
    pub user_id: i64,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct AuthenticationRecord {
    pub user_id: i64,
    pub token_hash: Vec<u8>,
    pub created_at: OffsetDateTime,
    pub expires_at: Option<OffsetDateTime>,
}

impl FullPostRecord {
    pub fn into_post(self, images: Vec<PostImageRecord>) -> Result<Post, ModelValidationError> {
        Ok(Post {
            id: Id::from_db(self.post_id),
            author: User {
                id: Id::from_db(self.user_id),
                handle: UserHandle::new(self.handle)?,
            },
            content: self.content,
            images: images
                .into_iter()
                .map(|image| PostImage { url: image.url })
                .collect(),
            created_at: self.created_at,
        })
    }
}

impl From<LikeRecord> for Like {
    fn from(value: LikeRecord) -> Self {
        Like::new(Id::from_db(value.post_id), Id::from_db(value.user_id))
    }
}

impl TryFrom<AuthenticationRecord> for Authentication {
    type Error = ModelValidationError;

    fn try_from(value: AuthenticationRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            user: Id::from_db(value.user_id),
            token_hash: value.token_hash.try_into()?,
            created_at: value.created_at,
            expires_at: value.expires_at,
        })
    }
}
