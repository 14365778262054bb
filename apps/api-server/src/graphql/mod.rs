//! GraphQL schema and its actix-web endpoints.

mod error;
mod mutation;
mod query;
mod types;

use actix_web::{HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql::{Context, EmptySubscription, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use agora_core::services::RequestContext;

use crate::middleware::auth::BearerIdentity;
use crate::state::AppState;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AgoraSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

const MAX_QUERY_DEPTH: usize = 10;

pub fn build_schema(state: &AppState) -> AgoraSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state.auth.clone())
        .data(state.posts.clone())
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}

/// The caller's context for this request. Requests executed without one are
/// anonymous.
pub(crate) fn request_context(ctx: &Context<'_>) -> RequestContext {
    ctx.data_opt::<RequestContext>()
        .cloned()
        .unwrap_or_default()
}

/// POST /graphql
pub async fn graphql_handler(
    schema: web::Data<AgoraSchema>,
    identity: BearerIdentity,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let ctx = RequestContext::from(identity);
    schema.execute(req.into_inner().data(ctx)).await.into()
}

/// GET /graphql
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[cfg(test)]
mod tests {
    use async_graphql::{Request, Response, Value};
    use serde_json::json;

    use agora_core::ports::TokenService;
    use agora_core::services::Identity;
    use agora_infra::{InMemoryStore, JwtConfig};

    use super::*;
    use crate::state::StorageBackend;

    fn setup() -> (AppState, AgoraSchema) {
        let state = AppState::with_store(
            InMemoryStore::new().into_data_store(),
            StorageBackend::InMemory,
            JwtConfig::new("schema-test-secret"),
        );
        let schema = build_schema(&state);
        (state, schema)
    }

    fn error_code(response: &Response) -> Option<Value> {
        response
            .errors
            .first()
            .and_then(|e| e.extensions.as_ref())
            .and_then(|ext| ext.get("code").cloned())
    }

    async fn register(
        state: &AppState,
        schema: &AgoraSchema,
        username: &str,
    ) -> RequestContext {
        let query = format!(
            r#"mutation {{
                register(registerInput: {{ username: "{username}", email: "{username}@x.com", password: "secret1" }}) {{
                    token
                    user {{ id username }}
                }}
            }}"#
        );
        let response = schema.execute(Request::new(query)).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let token = data["register"]["token"].as_str().unwrap();
        let claims = state.tokens.validate(token).unwrap();
        RequestContext::authenticated(Identity::from(claims))
    }

    async fn create_post(schema: &AgoraSchema, ctx: &RequestContext, body: &str) -> String {
        let query = format!(r#"mutation {{ createPost(body: "{body}") {{ id }} }}"#);
        let response = schema.execute(Request::new(query).data(ctx.clone())).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        data["createPost"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_returns_user_without_password() {
        let (_, schema) = setup();

        let response = schema
            .execute(Request::new(
                r#"mutation {
                    register(registerInput: { username: "alice", email: "a@x.com", password: "secret1" }) {
                        token
                        user { username email }
                    }
                }"#,
            ))
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(
            data["register"]["user"],
            json!({ "username": "alice", "email": "a@x.com" })
        );
        assert!(!data["register"]["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_register_is_conflict() {
        let (state, schema) = setup();
        register(&state, &schema, "alice").await;

        let response = schema
            .execute(Request::new(
                r#"mutation {
                    register(registerInput: { username: "alice", email: "other@x.com", password: "secret1" }) {
                        token
                    }
                }"#,
            ))
            .await;

        assert_eq!(error_code(&response), Some(Value::from("CONFLICT")));
    }

    #[tokio::test]
    async fn test_password_hash_is_not_queryable() {
        let (_, schema) = setup();

        let response = schema
            .execute(Request::new("{ me { passwordHash } }"))
            .await;

        assert!(!response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_create_post_is_unauthenticated() {
        let (_, schema) = setup();

        let response = schema
            .execute(Request::new(r#"mutation { createPost(body: "hi") { id } }"#))
            .await;
        let posts = schema.execute(Request::new("{ posts { id } }")).await;

        assert_eq!(error_code(&response), Some(Value::from("UNAUTHENTICATED")));
        assert_eq!(
            posts.data.into_json().unwrap(),
            json!({ "posts": [] })
        );
    }

    #[tokio::test]
    async fn test_me_returns_signed_in_user() {
        let (state, schema) = setup();
        let alice = register(&state, &schema, "alice").await;

        let response = schema
            .execute(Request::new("{ me { username } }").data(alice))
            .await;

        assert_eq!(
            response.data.into_json().unwrap(),
            json!({ "me": { "username": "alice" } })
        );
    }

    #[tokio::test]
    async fn test_like_post_toggles_like_count() {
        let (state, schema) = setup();
        let alice = register(&state, &schema, "alice").await;
        let post_id = create_post(&schema, &alice, "like me").await;
        let like = format!(r#"mutation {{ likePost(postId: "{post_id}") {{ likeCount }} }}"#);

        let first = schema
            .execute(Request::new(like.clone()).data(alice.clone()))
            .await;
        let second = schema.execute(Request::new(like).data(alice)).await;

        assert_eq!(
            first.data.into_json().unwrap(),
            json!({ "likePost": { "likeCount": 1 } })
        );
        assert_eq!(
            second.data.into_json().unwrap(),
            json!({ "likePost": { "likeCount": 0 } })
        );
    }

    #[tokio::test]
    async fn test_comment_flow_and_forbidden_delete() {
        let (state, schema) = setup();
        let alice = register(&state, &schema, "alice").await;
        let bob = register(&state, &schema, "bob").await;
        let post_id = create_post(&schema, &alice, "hello").await;

        let commented = schema
            .execute(
                Request::new(format!(
                    r#"mutation {{ createComment(postId: "{post_id}", body: "nice") {{ commentCount comments {{ id body }} }} }}"#
                ))
                .data(bob.clone()),
            )
            .await;
        let data = commented.data.into_json().unwrap();
        assert_eq!(data["createComment"]["commentCount"], json!(1));
        let comment_id = data["createComment"]["comments"][0]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let delete = format!(
            r#"mutation {{ deleteComment(postId: "{post_id}", commentId: "{comment_id}") {{ commentCount }} }}"#
        );
        let by_alice = schema
            .execute(Request::new(delete.clone()).data(alice))
            .await;
        let by_bob = schema.execute(Request::new(delete).data(bob)).await;

        assert_eq!(error_code(&by_alice), Some(Value::from("FORBIDDEN")));
        assert_eq!(
            by_bob.data.into_json().unwrap(),
            json!({ "deleteComment": { "commentCount": 0 } })
        );
    }

    #[tokio::test]
    async fn test_delete_post_by_non_owner_is_forbidden() {
        let (state, schema) = setup();
        let alice = register(&state, &schema, "alice").await;
        let bob = register(&state, &schema, "bob").await;
        let post_id = create_post(&schema, &alice, "mine").await;
        let delete = format!(r#"mutation {{ deletePost(postId: "{post_id}") {{ id }} }}"#);

        let by_bob = schema
            .execute(Request::new(delete.clone()).data(bob))
            .await;
        let by_alice = schema.execute(Request::new(delete).data(alice)).await;
        let lookup = schema
            .execute(Request::new(format!(r#"{{ post(id: "{post_id}") {{ id }} }}"#)))
            .await;

        assert_eq!(error_code(&by_bob), Some(Value::from("FORBIDDEN")));
        assert!(by_alice.errors.is_empty(), "{:?}", by_alice.errors);
        assert_eq!(lookup.data.into_json().unwrap(), json!({ "post": null }));
    }

    #[tokio::test]
    async fn test_posts_resolve_their_authors() {
        let (state, schema) = setup();
        let alice = register(&state, &schema, "alice").await;
        let bob = register(&state, &schema, "bob").await;
        let post_id = create_post(&schema, &alice, "hello").await;
        for query in [
            format!(r#"mutation {{ createComment(postId: "{post_id}", body: "hi") {{ id }} }}"#),
            format!(r#"mutation {{ likePost(postId: "{post_id}") {{ id }} }}"#),
        ] {
            let response = schema.execute(Request::new(query).data(bob.clone())).await;
            assert!(response.errors.is_empty(), "{:?}", response.errors);
        }

        let response = schema
            .execute(Request::new(
                "{ posts { author { username } comments { author { username } } likes { author { username } } } }",
            ))
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({
                "posts": [{
                    "author": { "username": "alice" },
                    "comments": [{ "author": { "username": "bob" } }],
                    "likes": [{ "author": { "username": "bob" } }]
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_me_lists_authored_content() {
        let (state, schema) = setup();
        let alice = register(&state, &schema, "alice").await;
        let bob = register(&state, &schema, "bob").await;
        let post_id = create_post(&schema, &alice, "hello").await;
        let response = schema
            .execute(
                Request::new(format!(
                    r#"mutation {{ createComment(postId: "{post_id}", body: "mine") {{ id }} }}"#
                ))
                .data(alice.clone()),
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let mine = schema
            .execute(
                Request::new("{ me { posts { id } comments { body } likes { id } } }")
                    .data(alice),
            )
            .await;
        let theirs = schema
            .execute(Request::new("{ me { posts { id } comments { body } } }").data(bob))
            .await;

        assert_eq!(
            mine.data.into_json().unwrap(),
            json!({
                "me": {
                    "posts": [{ "id": post_id }],
                    "comments": [{ "body": "mine" }],
                    "likes": []
                }
            })
        );
        assert_eq!(
            theirs.data.into_json().unwrap(),
            json!({ "me": { "posts": [], "comments": [] } })
        );
    }

    #[tokio::test]
    async fn test_login_with_unknown_user_is_not_found() {
        let (_, schema) = setup();

        let response = schema
            .execute(Request::new(
                r#"mutation { login(username: "ghost", password: "secret1") { token } }"#,
            ))
            .await;

        assert_eq!(error_code(&response), Some(Value::from("NOT_FOUND")));
    }
}
