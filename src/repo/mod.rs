//! Repository layer: the only code that talks to storage.
//!
//! Each resource gets its own async trait so handlers can hold an
//! `Arc<dyn …Repo>` and tests can swap in [`inmem::InMemRepo`].

use async_trait::async_trait;

use crate::models::*;

pub mod inmem;
pub mod pg;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    /// Zero rows matched a keyed lookup or update.
    #[error("not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait AuthorRepo: Send + Sync {
    async fn create_author(&self, new: NewAuthor) -> RepoResult<Author>;
    async fn get_author(&self, id: Id) -> RepoResult<Author>;
    async fn list_authors(&self) -> RepoResult<Vec<Author>>;
    async fn update_author(&self, id: Id, upd: UpdateAuthor) -> RepoResult<Author>;
    /// Succeeds whether or not a row existed.
    async fn delete_author(&self, id: Id) -> RepoResult<()>;
}

#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn create_post(&self, new: NewPost) -> RepoResult<Post>;
    async fn get_post(&self, id: Id) -> RepoResult<Post>;
    async fn list_posts(&self) -> RepoResult<Vec<Post>>;
    async fn update_post(&self, id: Id, upd: UpdatePost) -> RepoResult<Post>;
    async fn delete_post(&self, id: Id) -> RepoResult<()>;
}

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn create_comment(&self, new: NewComment) -> RepoResult<Comment>;
    async fn get_comment(&self, id: Id) -> RepoResult<Comment>;
    async fn list_comments_for_post(&self, post_id: Id) -> RepoResult<Vec<Comment>>;
    async fn update_comment(&self, id: Id, upd: UpdateComment) -> RepoResult<Comment>;
    async fn delete_comment(&self, id: Id) -> RepoResult<()>;
}

pub trait Repo: AuthorRepo + PostRepo + CommentRepo {}

impl<T> Repo for T where T: AuthorRepo + PostRepo + CommentRepo {}
