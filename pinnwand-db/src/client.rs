use crate::{
    record::{AuthenticationRecord, FullPostRecord, LikeRecord, PostImageRecord},
    repository::{LikeInsertion, Repository, Result},
};
use async_trait::async_trait;
use pinnwand_common::model::{
    Id,
    auth::{AuthTokenHash, Authentication},
    like::Like,
    post::{Post, PostMarker},
    user::UserMarker,
};
use sqlx::{PgPool, postgres::PgPoolOptions, query, query_as};
use tracing::debug;

/// Postgres backed [`Repository`].
#[derive(Clone, Debug)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for DbClient {
    async fn find_post_by_id(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let Some(record) = query_as::<_, FullPostRecord>(
            "
            SELECT
                posts.post_id,
                posts.content,
                posts.created_at,
                users.user_id,
                users.handle
            FROM
                posts.posts
                JOIN users.users ON users.user_id = posts.user_id
            WHERE
                posts.post_id = $1
            ",
        )
        .bind(post_id.to_db())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let images = query_as::<_, PostImageRecord>(
            "
            SELECT
                post_images.url
            FROM
                posts.post_images
            WHERE
                post_images.post_id = $1
            ORDER BY
                post_images.position
            ",
        )
        .bind(post_id.to_db())
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(record.into_post(images)?))
    }

    async fn find_post_likes(&self, post_id: Id<PostMarker>) -> Result<Vec<Like>> {
        let records = query_as::<_, LikeRecord>(
            "
            SELECT
                post_likes.post_id,
                post_likes.user_id
            FROM
                posts.post_likes
            WHERE
                post_likes.post_id = $1
            ",
        )
        .bind(post_id.to_db())
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Like::from).collect())
    }

    async fn find_like(
        &self,
        post_id: Id<PostMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Option<Like>> {
        let record = query_as::<_, LikeRecord>(
            "
            SELECT
                post_likes.post_id,
                post_likes.user_id
            FROM
                posts.post_likes
            WHERE
                post_likes.post_id = $1
                AND post_likes.user_id = $2
            ",
        )
        .bind(post_id.to_db())
        .bind(user_id.to_db())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Like::from))
    }

    async fn insert_like(&self, like: Like) -> Result<LikeInsertion> {
        let result = query(
            "
            INSERT INTO posts.post_likes (post_id, user_id)
            VALUES ($1, $2)
            ",
        )
        .bind(like.post.to_db())
        .bind(like.user.to_db())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(LikeInsertion::Inserted),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                debug!(post = %like.post, user = %like.user, "Like insert hit unique constraint");
                Ok(LikeInsertion::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_like(&self, like: Like) -> Result<bool> {
        let result = query(
            "
            DELETE FROM posts.post_likes
            WHERE
                post_likes.post_id = $1
                AND post_likes.user_id = $2
            ",
        )
        .bind(like.post.to_db())
        .bind(like.user.to_db())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_authentication(
        &self,
        token_hash: &AuthTokenHash,
    ) -> Result<Option<Authentication>> {
        let record = query_as::<_, AuthenticationRecord>(
            "
            SELECT
                authentications.user_id,
                authentications.token_hash,
                authentications.created_at,
                authentications.expires_at
            FROM
                auth.authentications
            WHERE
                authentications.token_hash = $1
            ",
        )
        .bind(&token_hash.0[..])
        .fetch_optional(&self.pool)
        .await?;

        let authentication = record.map(Authentication::try_from).transpose()?;
        Ok(authentication)
    }
}
