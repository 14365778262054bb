//! Posts, comments and likes.

use uuid::Uuid;

use crate::domain::{Comment, Like, Post, PostDetail, require_text};
use crate::error::DomainError;
use crate::ports::{
    BaseRepository, CommentRepository, DataStore, LikeRepository, PostRepository,
};

use super::guard::{RequestContext, authenticate};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Post, comment and like use cases.
///
/// Every mutation authenticates first and checks ownership before it
/// deletes anything.
pub struct PostService {
    store: DataStore,
}

impl PostService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub async fn create_post(
        &self,
        ctx: &RequestContext,
        body: &str,
    ) -> Result<PostDetail, DomainError> {
        let user_id = authenticate(ctx)?;
        require_text(body, "body")?;

        let post = self
            .store
            .posts
            .insert(Post::new(user_id, body.to_string()))
            .await?;
        tracing::info!(post_id = %post.id, author_id = %user_id, "Post created");

        Ok(PostDetail {
            post,
            comments: Vec::new(),
            likes: Vec::new(),
        })
    }

    /// Delete a post owned by the caller. Returns the post as it was right
    /// before deletion; its comments and likes go with it.
    pub async fn delete_post(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
    ) -> Result<PostDetail, DomainError> {
        let user_id = authenticate(ctx)?;

        if !self.store.posts.exists_owned_by(post_id, user_id).await? {
            tracing::warn!(%post_id, %user_id, "Post deletion refused");
            return Err(DomainError::Forbidden);
        }

        let detail = self.load_detail(post_id).await?;
        self.store.posts.delete(post_id).await?;
        tracing::info!(%post_id, %user_id, "Post deleted");

        Ok(detail)
    }

    pub async fn create_comment(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
        body: &str,
    ) -> Result<PostDetail, DomainError> {
        let user_id = authenticate(ctx)?;
        require_text(body, "body")?;

        if !self.store.posts.exists(post_id).await? {
            return Err(DomainError::not_found("Post", post_id));
        }

        let comment = self
            .store
            .comments
            .insert(Comment::new(post_id, user_id, body.to_string()))
            .await?;
        tracing::info!(comment_id = %comment.id, %post_id, author_id = %user_id, "Comment created");

        self.load_detail(post_id).await
    }

    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<PostDetail, DomainError> {
        let user_id = authenticate(ctx)?;

        // The comment must belong to the named post; nothing is written otherwise.
        let comment = self
            .store
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;
        if !self.store.posts.exists(comment.post_id).await? {
            return Err(DomainError::not_found("Post", post_id));
        }

        if !self
            .store
            .comments
            .exists_owned_by(comment_id, user_id)
            .await?
        {
            tracing::warn!(%comment_id, %user_id, "Comment deletion refused");
            return Err(DomainError::Forbidden);
        }

        self.store.comments.delete(comment_id).await?;
        tracing::info!(%comment_id, %post_id, %user_id, "Comment deleted");

        self.load_detail(post_id).await
    }

    /// Toggle the caller's like on a post: remove it if present, add it
    /// otherwise.
    pub async fn like_post(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
    ) -> Result<PostDetail, DomainError> {
        let user_id = authenticate(ctx)?;

        if !self.store.posts.exists(post_id).await? {
            return Err(DomainError::not_found("Post", post_id));
        }

        let existing = self
            .store
            .likes
            .find_by_post_and_author(post_id, user_id)
            .await?;

        match existing.into_iter().next() {
            Some(like) => {
                self.store.likes.delete(like.id).await?;
                tracing::debug!(%post_id, %user_id, "Post unliked");
            }
            None => {
                self.store.likes.insert(Like::new(post_id, user_id)).await?;
                tracing::debug!(%post_id, %user_id, "Post liked");
            }
        }

        self.load_detail(post_id).await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<PostDetail>, DomainError> {
        match self.store.posts.find_by_id(post_id).await? {
            Some(post) => Ok(Some(self.detail_for(post).await?)),
            None => Ok(None),
        }
    }

    /// Newest posts first. `limit` defaults to 20 and is capped at 100.
    pub async fn list_posts(&self, limit: Option<u64>) -> Result<Vec<PostDetail>, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let posts = self.store.posts.list_recent(limit).await?;

        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(self.detail_for(post).await?);
        }
        Ok(details)
    }

    /// Posts written by a user, newest first.
    pub async fn posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostDetail>, DomainError> {
        let posts = self.store.posts.find_by_author(author_id).await?;

        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(self.detail_for(post).await?);
        }
        Ok(details)
    }

    pub async fn comments_by_author(&self, author_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.store.comments.find_by_author(author_id).await?)
    }

    pub async fn likes_by_author(&self, author_id: Uuid) -> Result<Vec<Like>, DomainError> {
        Ok(self.store.likes.find_by_author(author_id).await?)
    }

    async fn load_detail(&self, post_id: Uuid) -> Result<PostDetail, DomainError> {
        let post = self
            .store
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))?;

        self.detail_for(post).await
    }

    async fn detail_for(&self, post: Post) -> Result<PostDetail, DomainError> {
        let comments = self.store.comments.find_by_post(post.id).await?;
        let likes = self.store.likes.find_by_post(post.id).await?;

        Ok(PostDetail {
            post,
            comments,
            likes,
        })
    }
}
