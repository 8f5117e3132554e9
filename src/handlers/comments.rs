use actix_web::{web, HttpResponse};

use crate::error::{ApiError, ApiErrorBody};
use crate::handlers::parse_id;
use crate::models::*;
use crate::routes::AppState;

const INVALID_ID: &str = "invalid comment id";

#[utoipa::path(
    post,
    path = "/comments",
    tag = "comments",
    request_body = NewComment,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Malformed body", body = ApiErrorBody),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    )
)]
pub async fn create_comment(
    data: web::Data<AppState>,
    payload: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    let comment = data
        .comments
        .create_comment(payload.into_inner())
        .await
        .map_err(|e| ApiError::storage("create comment", e))?;
    Ok(HttpResponse::Created().json(comment))
}

/// The post itself is not looked up; an unknown post just has no comments.
#[utoipa::path(
    get,
    path = "/posts/{postId}/comments",
    tag = "comments",
    params(("postId" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments on the post, newest first", body = [Comment]),
        (status = 400, description = "Invalid post id", body = ApiErrorBody)
    )
)]
pub async fn list_comments_for_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let post_id = parse_id(&path, "invalid post id")?;
    let comments = data
        .comments
        .list_comments_for_post(post_id)
        .await
        .map_err(|e| ApiError::storage("list comments", e))?;
    Ok(HttpResponse::Ok().json(comments))
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment", body = Comment),
        (status = 400, description = "Invalid id", body = ApiErrorBody),
        (status = 404, description = "Comment not found", body = ApiErrorBody)
    )
)]
pub async fn get_comment(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    let comment = data
        .comments
        .get_comment(id)
        .await
        .map_err(|e| ApiError::lookup("comment", "get comment", e))?;
    Ok(HttpResponse::Ok().json(comment))
}

#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = UpdateComment,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 400, description = "Invalid id or body", body = ApiErrorBody),
        (status = 500, description = "Update failed, including a missing comment", body = ApiErrorBody)
    )
)]
pub async fn update_comment(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateComment>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    let comment = data
        .comments
        .update_comment(id, payload.into_inner())
        .await
        .map_err(|e| ApiError::storage("update comment", e))?;
    Ok(HttpResponse::Ok().json(comment))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Deleted, or never existed"),
        (status = 400, description = "Invalid id", body = ApiErrorBody)
    )
)]
pub async fn delete_comment(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    data.comments
        .delete_comment(id)
        .await
        .map_err(|e| ApiError::storage("delete comment", e))?;
    Ok(HttpResponse::NoContent().finish())
}
