use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use agora_core::services::{AuthService, PostService};

use super::error::GraphQLResultExt;
use super::request_context;
use super::types::{AuthPayloadObject, PostObject, RegisterInput};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register(
        &self,
        ctx: &Context<'_>,
        register_input: RegisterInput,
    ) -> Result<AuthPayloadObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let payload = auth
            .register(
                &register_input.username,
                &register_input.email,
                &register_input.password,
            )
            .await
            .into_gql()?;
        Ok(payload.into())
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        #[graphql(secret)] password: String,
    ) -> Result<AuthPayloadObject> {
        let auth = ctx.data::<Arc<AuthService>>()?;
        let payload = auth.login(&username, &password).await.into_gql()?;
        Ok(payload.into())
    }

    async fn create_post(&self, ctx: &Context<'_>, body: String) -> Result<PostObject> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let detail = posts
            .create_post(&request_context(ctx), &body)
            .await
            .into_gql()?;
        Ok(detail.into())
    }

    /// Delete one of the caller's posts. Returns the post as it was.
    async fn delete_post(&self, ctx: &Context<'_>, post_id: Uuid) -> Result<PostObject> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let detail = posts
            .delete_post(&request_context(ctx), post_id)
            .await
            .into_gql()?;
        Ok(detail.into())
    }

    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        post_id: Uuid,
        body: String,
    ) -> Result<PostObject> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let detail = posts
            .create_comment(&request_context(ctx), post_id, &body)
            .await
            .into_gql()?;
        Ok(detail.into())
    }

    async fn delete_comment(
        &self,
        ctx: &Context<'_>,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<PostObject> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let detail = posts
            .delete_comment(&request_context(ctx), post_id, comment_id)
            .await
            .into_gql()?;
        Ok(detail.into())
    }

    /// Toggle the caller's like on a post.
    async fn like_post(&self, ctx: &Context<'_>, post_id: Uuid) -> Result<PostObject> {
        let posts = ctx.data::<Arc<PostService>>()?;
        let detail = posts
            .like_post(&request_context(ctx), post_id)
            .await
            .into_gql()?;
        Ok(detail.into())
    }
}
