//! In-process [`Repository`] for tests and running without a database.

use crate::repository::{LikeInsertion, Repository, Result};
use async_trait::async_trait;
use pinnwand_common::model::{
    Id,
    auth::{AuthTokenHash, Authentication},
    like::Like,
    post::{Post, PostMarker},
    user::{User, UserMarker},
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<Id<UserMarker>, User>,
    posts: BTreeMap<Id<PostMarker>, Post>,
    likes: BTreeSet<Like>,
    authentications: HashMap<AuthTokenHash, Authentication>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.id, user);
    }

    /// Also inserts the author, so a post never points at a missing user.
    pub async fn insert_post(&self, post: Post) {
        let mut tables = self.tables.write().await;
        tables
            .users
            .entry(post.author.id)
            .or_insert_with(|| post.author.clone());
        tables.posts.insert(post.id, post);
    }

    pub async fn insert_authentication(&self, authentication: Authentication) {
        self.tables
            .write()
            .await
            .authentications
            .insert(authentication.token_hash.clone(), authentication);
    }

    pub async fn like_count(&self, post_id: Id<PostMarker>) -> usize {
        self.tables
            .read()
            .await
            .likes
            .range(Like::new(post_id, Id::new(0))..=Like::new(post_id, Id::new(u64::MAX)))
            .count()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn find_post_by_id(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&post_id).cloned())
    }

    async fn find_post_likes(&self, post_id: Id<PostMarker>) -> Result<Vec<Like>> {
        let tables = self.tables.read().await;
        let likes = tables
            .likes
            .range(Like::new(post_id, Id::new(0))..=Like::new(post_id, Id::new(u64::MAX)))
            .copied()
            .collect();

        Ok(likes)
    }

    async fn find_like(
        &self,
        post_id: Id<PostMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Option<Like>> {
        let like = Like::new(post_id, user_id);
        Ok(self.tables.read().await.likes.get(&like).copied())
    }

    async fn insert_like(&self, like: Like) -> Result<LikeInsertion> {
        if self.tables.write().await.likes.insert(like) {
            Ok(LikeInsertion::Inserted)
        } else {
            Ok(LikeInsertion::AlreadyExists)
        }
    }

    async fn delete_like(&self, like: Like) -> Result<bool> {
        Ok(self.tables.write().await.likes.remove(&like))
    }

    async fn find_authentication(
        &self,
        token_hash: &AuthTokenHash,
    ) -> Result<Option<Authentication>> {
        Ok(self
            .tables
            .read()
            .await
            .authentications
            .get(token_hash)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        memory::MemoryStore,
        repository::{LikeInsertion, Repository},
    };
    use pinnwand_common::model::{
        Id,
        like::Like,
        post::Post,
        user::{User, UserHandle},
    };
    use time::macros::datetime;

    fn post(id: u64, author: u64) -> Post {
        Post {
            id: Id::new(id),
            author: User {
                id: Id::new(author),
                handle: UserHandle::new(format!("user{author}")).unwrap(),
            },
            content: format!("post {id}"),
            images: Vec::new(),
            created_at: datetime!(2025-10-24 10:00 UTC),
        }
    }

    #[tokio::test]
    async fn insert_like_is_unique_per_pair() {
        let store = MemoryStore::new();
        let like = Like::new(Id::new(1), Id::new(20));

        assert_eq!(store.insert_like(like).await.unwrap(), LikeInsertion::Inserted);
        assert_eq!(
            store.insert_like(like).await.unwrap(),
            LikeInsertion::AlreadyExists
        );
        assert_eq!(store.like_count(Id::new(1)).await, 1);
    }

    #[tokio::test]
    async fn likes_are_scoped_to_their_post() {
        let store = MemoryStore::new();
        store.insert_post(post(1, 10)).await;
        store.insert_post(post(2, 10)).await;

        for (post, user) in [(1, 20), (1, 30), (2, 20)] {
            store
                .insert_like(Like::new(Id::new(post), Id::new(user)))
                .await
                .unwrap();
        }

        let likes = store.find_post_likes(Id::new(1)).await.unwrap();
        assert_eq!(
            likes,
            [
                Like::new(Id::new(1), Id::new(20)),
                Like::new(Id::new(1), Id::new(30))
            ]
        );
        assert!(
            store
                .find_like(Id::new(2), Id::new(30))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::new();
        let like = Like::new(Id::new(1), Id::new(20));
        store.insert_like(like).await.unwrap();

        assert!(store.delete_like(like).await.unwrap());
        assert!(!store.delete_like(like).await.unwrap());
        assert!(store.find_like(like.post, like.user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_post_registers_author() {
        let store = MemoryStore::new();
        store.insert_post(post(1, 10)).await;

        let found = store.find_post_by_id(Id::new(1)).await.unwrap().unwrap();
        assert_eq!(found.author.id, Id::new(10));
        assert!(store.find_post_by_id(Id::new(2)).await.unwrap().is_none());
        assert!(store.tables.read().await.users.contains_key(&Id::new(10)));
    }
}
