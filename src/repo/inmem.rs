//! In-memory store implementing every repository trait. Used as the fake
//! behind handler tests and for running the service without Postgres.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::*;

struct AuthorRow {
    author: Author,
    #[allow(dead_code)] // write-only, kept to mirror the authors table
    password_hash: String,
}

#[derive(Default)]
struct State {
    authors: HashMap<Id, AuthorRow>,
    posts: HashMap<Id, Post>,
    comments: HashMap<Id, Comment>,
    next_author_id: Id,
    next_post_id: Id,
    next_comment_id: Id,
}

#[derive(Clone, Default)]
pub struct InMemRepo {
    state: Arc<RwLock<State>>,
}

impl InMemRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(counter: &mut Id) -> Id {
    *counter += 1;
    *counter
}

/// Mutation timestamp that is strictly later than `prev`, even if the wall
/// clock has not moved since the last write.
fn touch(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}

/// Newest first; id breaks ties between rows created in the same instant.
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, Id)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl AuthorRepo for InMemRepo {
    async fn create_author(&self, new: NewAuthor) -> RepoResult<Author> {
        let mut s = self.state.write().await;
        let now = Utc::now();
        let id = next_id(&mut s.next_author_id);
        let author = Author {
            id,
            username: new.username,
            full_name: new.full_name,
            email: new.email,
            role: new.role,
            bio: new.bio,
            avatar_url: new.avatar_url,
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        s.authors.insert(
            id,
            AuthorRow {
                author: author.clone(),
                password_hash: new.password_hash,
            },
        );
        Ok(author)
    }

    async fn get_author(&self, id: Id) -> RepoResult<Author> {
        let s = self.state.read().await;
        s.authors.get(&id).map(|row| row.author.clone()).ok_or(RepoError::NotFound)
    }

    async fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let s = self.state.read().await;
        let mut v: Vec<_> = s.authors.values().map(|row| row.author.clone()).collect();
        newest_first(&mut v, |a| (a.created_at, a.id));
        Ok(v)
    }

    async fn update_author(&self, id: Id, upd: UpdateAuthor) -> RepoResult<Author> {
        let mut s = self.state.write().await;
        let author = &mut s.authors.get_mut(&id).ok_or(RepoError::NotFound)?.author;
        if let Some(v) = upd.full_name {
            author.full_name = v;
        }
        if let Some(v) = upd.email {
            author.email = v;
        }
        if let Some(v) = upd.role {
            author.role = v;
        }
        if let Some(v) = upd.bio {
            author.bio = v;
        }
        if let Some(v) = upd.avatar_url {
            author.avatar_url = v;
        }
        if let Some(v) = upd.is_active {
            author.is_active = v;
        }
        author.updated_at = touch(author.updated_at);
        Ok(author.clone())
    }

    async fn delete_author(&self, id: Id) -> RepoResult<()> {
        self.state.write().await.authors.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepo for InMemRepo {
    async fn create_post(&self, new: NewPost) -> RepoResult<Post> {
        let mut s = self.state.write().await;
        let now = Utc::now();
        let id = next_id(&mut s.next_post_id);
        let post = Post {
            id,
            title: new.title,
            content: new.content,
            cover_image: new.cover_image,
            author_id: new.author_id,
            created_at: now,
            updated_at: now,
        };
        s.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Id) -> RepoResult<Post> {
        let s = self.state.read().await;
        s.posts.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        let s = self.state.read().await;
        let mut v: Vec<_> = s.posts.values().cloned().collect();
        newest_first(&mut v, |p| (p.created_at, p.id));
        Ok(v)
    }

    async fn update_post(&self, id: Id, upd: UpdatePost) -> RepoResult<Post> {
        let mut s = self.state.write().await;
        let post = s.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        if let Some(v) = upd.title {
            post.title = v;
        }
        if let Some(v) = upd.content {
            post.content = v;
        }
        if let Some(v) = upd.cover_image {
            post.cover_image = v;
        }
        post.updated_at = touch(post.updated_at);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Id) -> RepoResult<()> {
        self.state.write().await.posts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepo for InMemRepo {
    async fn create_comment(&self, new: NewComment) -> RepoResult<Comment> {
        let mut s = self.state.write().await;
        let now = Utc::now();
        let id = next_id(&mut s.next_comment_id);
        let comment = Comment {
            id,
            post_id: new.post_id,
            author_id: new.author_id,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        s.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, id: Id) -> RepoResult<Comment> {
        let s = self.state.read().await;
        s.comments.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn list_comments_for_post(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        let s = self.state.read().await;
        let mut v: Vec<_> = s.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        newest_first(&mut v, |c| (c.created_at, c.id));
        Ok(v)
    }

    async fn update_comment(&self, id: Id, upd: UpdateComment) -> RepoResult<Comment> {
        let mut s = self.state.write().await;
        let comment = s.comments.get_mut(&id).ok_or(RepoError::NotFound)?;
        if let Some(v) = upd.content {
            comment.content = v;
        }
        comment.updated_at = touch(comment.updated_at);
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: Id) -> RepoResult<()> {
        self.state.write().await.comments.remove(&id);
        Ok(())
    }
}
