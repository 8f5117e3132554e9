use actix_web::{web, HttpResponse};

use crate::error::{ApiError, ApiErrorBody};
use crate::handlers::parse_id;
use crate::models::*;
use crate::routes::AppState;

const INVALID_ID: &str = "invalid post id";

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = NewPost,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Malformed body", body = ApiErrorBody),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    )
)]
pub async fn create_post(
    data: web::Data<AppState>,
    payload: web::Json<NewPost>,
) -> Result<HttpResponse, ApiError> {
    let post = data
        .posts
        .create_post(payload.into_inner())
        .await
        .map_err(|e| ApiError::storage("create post", e))?;
    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [Post]),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    )
)]
pub async fn list_posts(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = data
        .posts
        .list_posts()
        .await
        .map_err(|e| ApiError::storage("list posts", e))?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 400, description = "Invalid id", body = ApiErrorBody),
        (status = 404, description = "Post not found", body = ApiErrorBody)
    )
)]
pub async fn get_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    let post = data
        .posts
        .get_post(id)
        .await
        .map_err(|e| ApiError::lookup("post", "get post", e))?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePost,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Invalid id or body", body = ApiErrorBody),
        (status = 500, description = "Update failed, including a missing post", body = ApiErrorBody)
    )
)]
pub async fn update_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePost>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    let post = data
        .posts
        .update_post(id, payload.into_inner())
        .await
        .map_err(|e| ApiError::storage("update post", e))?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted, or never existed"),
        (status = 400, description = "Invalid id", body = ApiErrorBody)
    )
)]
pub async fn delete_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    data.posts
        .delete_post(id)
        .await
        .map_err(|e| ApiError::storage("delete post", e))?;
    Ok(HttpResponse::NoContent().finish())
}
