use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, Transaction};
use serde_json::json;
use uuid::Uuid;

use quill_core::domain::{EmailAddress, Post, PostCategory};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, SubscriberRepository};

use super::entity::{post, subscriber};
use super::postgres_repo::{PostgresPostRepository, PostgresSubscriberRepository};

fn post_row(id: Uuid, slug: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        slug: slug.to_owned(),
        summary: "Summary".to_owned(),
        content: "Some content here".to_owned(),
        image: None,
        category: "DevLog".to_owned(),
        tags: Some(json!(["rust", "web"])),
        is_featured: Some(true),
        reading_time_minutes: Some(1),
        created_at: now.into(),
        updated_at: Some(now.into()),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_row(post_id, "test-post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.category, PostCategory::DevLog);
    assert_eq!(post.tags, vec!["rust".to_string(), "web".to_string()]);
    assert!(post.is_featured);
}

#[tokio::test]
async fn test_nullable_columns_read_as_defaults() {
    let mut row = post_row(Uuid::new_v4(), "legacy");
    row.category = "Proje".to_owned();
    row.tags = None;
    row.is_featured = None;
    row.reading_time_minutes = None;
    row.updated_at = None;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let post = repo.find_by_slug("legacy").await.unwrap().unwrap();
    assert_eq!(post.category, PostCategory::Project);
    assert!(post.tags.is_empty());
    assert!(!post.is_featured);
    assert_eq!(post.reading_time_minutes, 0);
}

#[tokio::test]
async fn test_list_orders_by_creation_desc() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_row(Uuid::new_v4(), "b"),
            post_row(Uuid::new_v4(), "a"),
        ]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let posts = repo.list_newest_first().await.unwrap();
    assert_eq!(posts.len(), 2);

    let log = repo.db.into_transaction_log();
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("ORDER BY"));
    assert!(sql.contains("created_at"));
}

#[tokio::test]
async fn test_save_is_an_upsert_on_id() {
    let id = Uuid::new_v4();
    let row = post_row(id, "test-post");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row.clone()]])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let saved: Post = repo.save(Post::from(row)).await.unwrap();
    assert_eq!(saved.id, id);

    let log = repo.db.into_transaction_log();
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("ON CONFLICT"));
    assert!(sql.contains("DO UPDATE SET"));
}

#[tokio::test]
async fn test_delete_all_uses_nil_sentinel() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 7,
        }])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    assert_eq!(repo.delete_all().await.unwrap(), 7);

    let log = repo.db.into_transaction_log();
    assert_eq!(
        log[0],
        Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"DELETE FROM "posts" WHERE "posts"."id" <> $1"#,
            [Uuid::nil().into()],
        )
    );
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    let result: Result<(), RepoError> =
        BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_query_failure_is_reported() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
            "connection reset".to_owned(),
        ))])
        .into_connection();
    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.list_newest_first().await,
        Err(RepoError::Query(_))
    ));
}

#[tokio::test]
async fn test_insert_subscriber() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![subscriber::Model {
            id: Uuid::new_v4(),
            email: "reader@example.com".to_owned(),
            created_at: now.into(),
        }]])
        .into_connection();
    let repo = PostgresSubscriberRepository::new(db);

    let email = EmailAddress::parse("reader@example.com").unwrap();
    let subscriber = repo.insert(&email).await.unwrap();
    assert_eq!(subscriber.email, "reader@example.com");
}
