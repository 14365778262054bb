use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use agora_core::domain::{Comment, Post};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

fn post_model(id: Uuid, author_id: Uuid, body: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        author_id,
        body: body.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id, "Hello")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.body, "Hello");
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: Uuid::new_v4(),
            username: "alice".to_owned(),
            email: "a@x.com".to_owned(),
            password_hash: "$argon2id$hash".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_username("alice").await.unwrap().unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn test_exists_owned_by_with_no_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let owned = repo
        .exists_owned_by(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();

    assert!(!owned);
}

#[tokio::test]
async fn test_list_recent_maps_rows() {
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            post_model(Uuid::new_v4(), author_id, "newer"),
            post_model(Uuid::new_v4(), author_id, "older"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.list_recent(20).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].body, "newer");
}

#[tokio::test]
async fn test_delete_comment_without_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let result = BaseRepository::<Comment, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_comments_for_missing_post_is_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<crate::database::entity::comment::Model>::new()])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    assert!(repo.find_by_post(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_posts_by_author() {
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(Uuid::new_v4(), author_id, "mine")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_author(author_id).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author_id, author_id);
}
