use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use agora_core::services::{AuthService, PostService};

use super::error::GraphQLResultExt;
use super::request_context;
use super::types::{PostObject, UserObject};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A single post with its comments and likes.
    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<PostObject>> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let detail = posts.get_post(id).await.into_gql()?;
        Ok(detail.map(Into::into))
    }

    /// Newest posts first. `limit` defaults to 20 and is capped at 100.
    async fn posts(&self, ctx: &Context<'_>, limit: Option<i32>) -> Result<Vec<PostObject>> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let limit = limit.map(|l| u64::try_from(l).unwrap_or(0));
        let details = posts.list_posts(limit).await.into_gql()?;
        Ok(details.into_iter().map(Into::into).collect())
    }

    /// The signed-in user.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let user = auth.current_user(&request_context(ctx)).await.into_gql()?;
        Ok(Some(user.into()))
    }
}
