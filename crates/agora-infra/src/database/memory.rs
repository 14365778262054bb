//! In-memory store - used when no database is configured, and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{Comment, Like, Post, User};
use agora_core::error::RepoError;
use agora_core::ports::{
    BaseRepository, CommentRepository, DataStore, LikeRepository, PostRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    likes: HashMap<Uuid, Like>,
}

/// All four tables behind one async RwLock.
///
/// Mirrors the relational schema: unique usernames and emails, one like per
/// (post, author), child rows must reference an existing post, and deleting a
/// post removes its comments and likes.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share one store behind every repository port.
    pub fn into_data_store(self) -> DataStore {
        let store = Arc::new(self);
        DataStore {
            users: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            likes: store,
        }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        let owned: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            remove_post(&mut tables, post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);
        tables.likes.retain(|_, l| l.author_id != id);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("Author does not exist".to_string()));
        }

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !remove_post(&mut tables, id) {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.tables.read().await.posts.contains_key(&id))
    }

    async fn exists_owned_by(&self, id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .get(&id)
            .is_some_and(|p| p.author_id == author_id))
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint("Post does not exist".to_string()));
        }

        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn exists_owned_by(&self, id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .get(&id)
            .is_some_and(|c| c.author_id == author_id))
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl BaseRepository<Like, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Like>, RepoError> {
        Ok(self.tables.read().await.likes.get(&id).cloned())
    }

    async fn insert(&self, like: Like) -> Result<Like, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&like.post_id) {
            return Err(RepoError::Constraint("Post does not exist".to_string()));
        }

        let duplicate = tables
            .likes
            .values()
            .any(|l| l.post_id == like.post_id && l.author_id == like.author_id);
        if duplicate {
            return Err(RepoError::Constraint("Post already liked".to_string()));
        }

        tables.likes.insert(like.id, like.clone());
        Ok(like)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.likes.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn find_by_post_and_author(
        &self,
        post_id: Uuid,
        author_id: Uuid,
    ) -> Result<Vec<Like>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .likes
            .values()
            .filter(|l| l.post_id == post_id && l.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Like>, RepoError> {
        let tables = self.tables.read().await;
        let mut likes: Vec<Like> = tables
            .likes
            .values()
            .filter(|l| l.post_id == post_id)
            .cloned()
            .collect();
        likes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(likes)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Like>, RepoError> {
        let tables = self.tables.read().await;
        let mut likes: Vec<Like> = tables
            .likes
            .values()
            .filter(|l| l.author_id == author_id)
            .cloned()
            .collect();
        likes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(likes)
    }
}

/// Remove a post and everything hanging off it. Returns false if it was absent.
fn remove_post(tables: &mut Tables, post_id: Uuid) -> bool {
    if tables.posts.remove(&post_id).is_none() {
        return false;
    }
    tables.comments.retain(|_, c| c.post_id != post_id);
    tables.likes.retain(|_, l| l.post_id != post_id);
    true
}
