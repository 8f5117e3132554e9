use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use sqlx::PgPool;
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::handlers::{authors, comments, posts};
use crate::openapi::{ApiDoc, OPENAPI_PATH};
use crate::repo::pg::{PgAuthorRepo, PgCommentRepo, PgPostRepo};
use crate::repo::{AuthorRepo, CommentRepo, PostRepo, Repo};

/// Route table. Paths registered here answer 405 for other methods; anything
/// else falls through to actix's 404.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/posts")
                .route(web::post().to(posts::create_post))
                .route(web::get().to(posts::list_posts)),
        )
        .service(
            web::resource("/posts/{id}")
                .route(web::get().to(posts::get_post))
                .route(web::put().to(posts::update_post))
                .route(web::delete().to(posts::delete_post)),
        )
        .service(
            web::resource("/posts/{postId}/comments")
                .route(web::get().to(comments::list_comments_for_post)),
        )
        .service(
            web::resource("/authors")
                .route(web::post().to(authors::create_author))
                .route(web::get().to(authors::list_authors)),
        )
        .service(
            web::resource("/authors/{id}")
                .route(web::get().to(authors::get_author))
                .route(web::put().to(authors::update_author))
                .route(web::delete().to(authors::delete_author)),
        )
        .service(web::resource("/comments").route(web::post().to(comments::create_comment)))
        .service(
            web::resource("/comments/{id}")
                .route(web::get().to(comments::get_comment))
                .route(web::put().to(comments::update_comment))
                .route(web::delete().to(comments::delete_comment)),
        )
        .service(web::resource(OPENAPI_PATH).route(web::get().to(openapi_json)));
}

/// Largest JSON body accepted, in bytes.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Oversized bodies are a 413; any other body that does not deserialize into
/// the expected shape is a 400. Content-Type is not enforced.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .content_type_required(false)
        .error_handler(|err: JsonPayloadError, req: &HttpRequest| {
            tracing::debug!(path = %req.path(), error = %err, "rejected request body");
            match err {
                JsonPayloadError::Overflow { .. }
                | JsonPayloadError::OverflowKnownLength { .. } => ApiError::PayloadTooLarge.into(),
                _ => ApiError::BadRequest("invalid request body").into(),
            }
        })
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Per-resource repositories shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorRepo>,
    pub posts: Arc<dyn PostRepo>,
    pub comments: Arc<dyn CommentRepo>,
}

impl AppState {
    /// Postgres-backed state; each repository gets its own handle to `pool`.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            authors: Arc::new(PgAuthorRepo::new(pool.clone())),
            posts: Arc::new(PgPostRepo::new(pool.clone())),
            comments: Arc::new(PgCommentRepo::new(pool)),
        }
    }

    /// One store serving all three resources, e.g. `InMemRepo`.
    pub fn from_repo<R: Repo + 'static>(repo: R) -> Self {
        let repo = Arc::new(repo);
        Self {
            authors: repo.clone(),
            posts: repo.clone(),
            comments: repo,
        }
    }
}
