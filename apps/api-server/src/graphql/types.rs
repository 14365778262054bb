//! GraphQL object and input types.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use agora_core::DomainError;
use agora_core::domain::{Comment, Like, PostDetail, User};
use agora_core::services::{AuthPayload, AuthService, PostService};

use super::error::GraphQLResultExt;

/// Public view of an account. The password hash has no field here.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User", complex)]
pub struct UserObject {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Comment", complex)]
pub struct CommentObject {
    pub id: Uuid,
    pub body: String,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentObject {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            author_id: comment.author_id,
            post_id: comment.post_id,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Like", complex)]
pub struct LikeObject {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Like> for LikeObject {
    fn from(like: Like) -> Self {
        Self {
            id: like.id,
            author_id: like.author_id,
            post_id: like.post_id,
            created_at: like.created_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Post", complex)]
pub struct PostObject {
    pub id: Uuid,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<CommentObject>,
    pub likes: Vec<LikeObject>,
    pub comment_count: i32,
    pub like_count: i32,
}

impl From<PostDetail> for PostObject {
    fn from(detail: PostDetail) -> Self {
        let comment_count = i32::try_from(detail.comment_count()).unwrap_or(i32::MAX);
        let like_count = i32::try_from(detail.like_count()).unwrap_or(i32::MAX);

        Self {
            id: detail.post.id,
            body: detail.post.body,
            author_id: detail.post.author_id,
            created_at: detail.post.created_at,
            updated_at: detail.post.updated_at,
            comments: detail.comments.into_iter().map(Into::into).collect(),
            likes: detail.likes.into_iter().map(Into::into).collect(),
            comment_count,
            like_count,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "AuthPayload")]
pub struct AuthPayloadObject {
    pub token: String,
    pub user: UserObject,
}

impl From<AuthPayload> for AuthPayloadObject {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.token,
            user: payload.user.into(),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    #[graphql(secret)]
    pub password: String,
}

/// Resolve the account behind an `author_id`.
async fn load_author(ctx: &Context<'_>, author_id: Uuid) -> Result<UserObject> {
    let auth = ctx.data::<Arc<AuthService>>()?;
    let user = auth
        .find_user(author_id)
        .await
        .and_then(|user| user.ok_or_else(|| DomainError::not_found("User", author_id)))
        .into_gql()?;
    Ok(user.into())
}

#[ComplexObject]
impl UserObject {
    /// Posts written by this user, newest first.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let details = posts.posts_by_author(self.id).await.into_gql()?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let comments = posts.comments_by_author(self.id).await.into_gql()?;
        Ok(comments.into_iter().map(Into::into).collect())
    }

    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<LikeObject>> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let likes = posts.likes_by_author(self.id).await.into_gql()?;
        Ok(likes.into_iter().map(Into::into).collect())
    }
}

#[ComplexObject]
impl PostObject {
    async fn author(&self, ctx: &Context<'_>) -> Result<UserObject> {
        load_author(ctx, self.author_id).await
    }
}

#[ComplexObject]
impl CommentObject {
    async fn author(&self, ctx: &Context<'_>) -> Result<UserObject> {
        load_author(ctx, self.author_id).await
    }
}

#[ComplexObject]
impl LikeObject {
    async fn author(&self, ctx: &Context<'_>) -> Result<UserObject> {
        load_author(ctx, self.author_id).await
    }
}
