//! Runs against a real Postgres when `TEST_DATABASE_URL` is set. The tables
//! from `schema.sql` are created if needed and truncated before each test.

use blogsite::models::{NewAuthor, NewComment, NewPost, UpdateAuthor, UpdatePost};
use blogsite::repo::pg::{PgAuthorRepo, PgCommentRepo, PgPostRepo};
use blogsite::repo::{AuthorRepo, CommentRepo, PostRepo, RepoError};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn pg_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await
        .ok()?;
    for stmt in include_str!("../schema.sql").split(';') {
        let has_sql = stmt.lines().any(|l| {
            let l = l.trim();
            !l.is_empty() && !l.starts_with("--")
        });
        if has_sql {
            sqlx::query(stmt).execute(&pool).await.ok()?;
        }
    }
    sqlx::query("TRUNCATE comments, posts, authors RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .ok()?;
    Some(pool)
}

fn ana() -> NewAuthor {
    NewAuthor {
        username: "ana".into(),
        email: "ana@x.com".into(),
        password_hash: "h1".into(),
        full_name: String::new(),
        role: "author".into(),
        bio: String::new(),
        avatar_url: String::new(),
    }
}

#[tokio::test]
#[serial_test::serial]
async fn author_and_post_crud() {
    let Some(pool) = pg_pool().await else {
        eprintln!("skip: no TEST_DATABASE_URL");
        return;
    };
    let authors = PgAuthorRepo::new(pool.clone());
    let posts = PgPostRepo::new(pool.clone());

    let a = authors.create_author(ana()).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(a.created_at, a.updated_at);
    assert_eq!(authors.get_author(a.id).await.unwrap(), a);

    // duplicate username surfaces as a storage error
    assert!(matches!(authors.create_author(ana()).await.unwrap_err(), RepoError::Storage(_)));

    let upd = authors
        .update_author(a.id, UpdateAuthor { is_active: Some(false), ..Default::default() })
        .await
        .unwrap();
    assert!(!upd.is_active);
    assert_eq!(upd.created_at, a.created_at);
    assert!(upd.updated_at > a.updated_at);

    let mut ids = Vec::new();
    for t in ["E1", "E2", "E3"] {
        let p = posts
            .create_post(NewPost {
                title: t.into(),
                content: "C".into(),
                cover_image: String::new(),
                author_id: a.id,
            })
            .await
            .unwrap();
        ids.push(p.id);
    }
    let listed: Vec<_> = posts.list_posts().await.unwrap().into_iter().map(|p| p.title).collect();
    assert_eq!(listed, ["E3", "E2", "E1"]);

    let p = posts
        .update_post(ids[0], UpdatePost { content: Some("C2".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!((p.title.as_str(), p.content.as_str()), ("E1", "C2"));
    assert!(matches!(
        posts.update_post(999, UpdatePost::default()).await.unwrap_err(),
        RepoError::NotFound
    ));

    posts.delete_post(ids[0]).await.unwrap();
    posts.delete_post(ids[0]).await.unwrap();
    assert!(matches!(posts.get_post(ids[0]).await.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
#[serial_test::serial]
async fn comments_by_post() {
    let Some(pool) = pg_pool().await else {
        eprintln!("skip: no TEST_DATABASE_URL");
        return;
    };
    let a = PgAuthorRepo::new(pool.clone()).create_author(ana()).await.unwrap();
    let p = PgPostRepo::new(pool.clone())
        .create_post(NewPost {
            title: "T".into(),
            content: "C".into(),
            cover_image: String::new(),
            author_id: a.id,
        })
        .await
        .unwrap();
    let comments = PgCommentRepo::new(pool);

    for content in ["first", "second"] {
        comments
            .create_comment(NewComment { post_id: p.id, author_id: a.id, content: content.into() })
            .await
            .unwrap();
    }
    let listed: Vec<_> = comments
        .list_comments_for_post(p.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.content)
        .collect();
    assert_eq!(listed, ["second", "first"]);
    assert!(comments.list_comments_for_post(p.id + 1).await.unwrap().is_empty());

    // unknown post violates the foreign key
    let err = comments
        .create_comment(NewComment { post_id: 424242, author_id: a.id, content: "x".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Storage(_)));
}
