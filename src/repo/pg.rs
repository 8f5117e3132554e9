//! Postgres repositories. Every operation is one parameterized statement
//! against the pool handed in at construction.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::*;

const AUTHOR_COLUMNS: &str =
    "id, username, full_name, email, role, bio, avatar_url, created_at, updated_at, is_active";
const POST_COLUMNS: &str = "id, title, content, cover_image, author_id, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, post_id, author_id, content, created_at, updated_at";

#[derive(Clone)]
pub struct PgAuthorRepo {
    pool: PgPool,
}

impl PgAuthorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepo for PgAuthorRepo {
    async fn create_author(&self, new: NewAuthor) -> RepoResult<Author> {
        let sql = format!(
            "INSERT INTO authors (username, full_name, email, role, password_hash, bio, avatar_url, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE) RETURNING {AUTHOR_COLUMNS}"
        );
        let author = sqlx::query_as::<_, Author>(&sql)
            .bind(&new.username)
            .bind(&new.full_name)
            .bind(&new.email)
            .bind(&new.role)
            .bind(&new.password_hash)
            .bind(&new.bio)
            .bind(&new.avatar_url)
            .fetch_one(&self.pool)
            .await?;
        debug!(id = author.id, "inserted author");
        Ok(author)
    }

    async fn get_author(&self, id: Id) -> RepoResult<Author> {
        let sql = format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let sql = format!("SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Author>(&sql).fetch_all(&self.pool).await?)
    }

    async fn update_author(&self, id: Id, upd: UpdateAuthor) -> RepoResult<Author> {
        let sql = format!(
            "UPDATE authors SET \
                full_name = COALESCE($2, full_name), \
                email = COALESCE($3, email), \
                role = COALESCE($4, role), \
                bio = COALESCE($5, bio), \
                avatar_url = COALESCE($6, avatar_url), \
                is_active = COALESCE($7, is_active), \
                updated_at = now() \
             WHERE id = $1 RETURNING {AUTHOR_COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&sql)
            .bind(id)
            .bind(upd.full_name)
            .bind(upd.email)
            .bind(upd.role)
            .bind(upd.bio)
            .bind(upd.avatar_url)
            .bind(upd.is_active)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_author(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = res.rows_affected(), "deleted author");
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn create_post(&self, new: NewPost) -> RepoResult<Post> {
        let sql = format!(
            "INSERT INTO posts (title, content, cover_image, author_id) \
             VALUES ($1, $2, $3, $4) RETURNING {POST_COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(&new.title)
            .bind(&new.content)
            .bind(&new.cover_image)
            .bind(new.author_id)
            .fetch_one(&self.pool)
            .await?;
        debug!(id = post.id, author_id = post.author_id, "inserted post");
        Ok(post)
    }

    async fn get_post(&self, id: Id) -> RepoResult<Post> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC");
        Ok(sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?)
    }

    async fn update_post(&self, id: Id, upd: UpdatePost) -> RepoResult<Post> {
        let sql = format!(
            "UPDATE posts SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                cover_image = COALESCE($4, cover_image), \
                updated_at = now() \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(upd.title)
            .bind(upd.content)
            .bind(upd.cover_image)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_post(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = res.rows_affected(), "deleted post");
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn create_comment(&self, new: NewComment) -> RepoResult<Comment> {
        let sql = format!(
            "INSERT INTO comments (post_id, author_id, content) \
             VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(new.post_id)
            .bind(new.author_id)
            .bind(&new.content)
            .fetch_one(&self.pool)
            .await?;
        debug!(id = comment.id, post_id = comment.post_id, "inserted comment");
        Ok(comment)
    }

    async fn get_comment(&self, id: Id) -> RepoResult<Comment> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn list_comments_for_post(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at DESC, id DESC"
        );
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_comment(&self, id: Id, upd: UpdateComment) -> RepoResult<Comment> {
        let sql = format!(
            "UPDATE comments SET content = COALESCE($2, content), updated_at = now() \
             WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .bind(upd.content)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_comment(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = res.rows_affected(), "deleted comment");
        Ok(())
    }
}
