use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Like, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining the operations every entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Uniqueness violations surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with account lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepoError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn exists(&self, id: Uuid) -> Result<bool, RepoError>;

    /// True when the post exists and was written by `author_id`.
    async fn exists_owned_by(&self, id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;

    /// Most recent posts first.
    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Posts written by `author_id`, newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// True when the comment exists and was written by `author_id`.
    async fn exists_owned_by(&self, id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;

    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Like repository.
#[async_trait]
pub trait LikeRepository: BaseRepository<Like, Uuid> {
    async fn find_by_post_and_author(
        &self,
        post_id: Uuid,
        author_id: Uuid,
    ) -> Result<Vec<Like>, RepoError>;

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Like>, RepoError>;

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Like>, RepoError>;
}

/// The persistence collaborator consumed by the services.
///
/// Comment and like collections are never stored on users or posts; they are
/// queried by foreign key (`post_id`, `author_id`), so creating a comment or a
/// like is a single insert.
#[derive(Clone)]
pub struct DataStore {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
}
