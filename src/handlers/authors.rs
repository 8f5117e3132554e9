//! Author endpoints. `Author` has no password field, so nothing here can echo
//! the hash accepted by `create_author`.

use actix_web::{web, HttpResponse};

use crate::error::{ApiError, ApiErrorBody};
use crate::handlers::parse_id;
use crate::models::*;
use crate::routes::AppState;

const INVALID_ID: &str = "invalid author id";

#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = NewAuthor,
    responses(
        (status = 201, description = "Author created (password hash omitted)", body = Author),
        (status = 400, description = "Malformed body", body = ApiErrorBody),
        (status = 500, description = "Storage failure, e.g. duplicate username", body = ApiErrorBody)
    )
)]
pub async fn create_author(
    data: web::Data<AppState>,
    payload: web::Json<NewAuthor>,
) -> Result<HttpResponse, ApiError> {
    let author = data
        .authors
        .create_author(payload.into_inner())
        .await
        .map_err(|e| ApiError::storage("create author", e))?;
    Ok(HttpResponse::Created().json(author))
}

#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors, newest first", body = [Author]),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    )
)]
pub async fn list_authors(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let authors = data
        .authors
        .list_authors()
        .await
        .map_err(|e| ApiError::storage("list authors", e))?;
    Ok(HttpResponse::Ok().json(authors))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author", body = Author),
        (status = 400, description = "Invalid id", body = ApiErrorBody),
        (status = 404, description = "Author not found", body = ApiErrorBody)
    )
)]
pub async fn get_author(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    let author = data
        .authors
        .get_author(id)
        .await
        .map_err(|e| ApiError::lookup("author", "get author", e))?;
    Ok(HttpResponse::Ok().json(author))
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid id or body", body = ApiErrorBody),
        (status = 500, description = "Update failed, including a missing author", body = ApiErrorBody)
    )
)]
pub async fn update_author(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAuthor>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    let author = data
        .authors
        .update_author(id, payload.into_inner())
        .await
        .map_err(|e| ApiError::storage("update author", e))?;
    Ok(HttpResponse::Ok().json(author))
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 204, description = "Deleted, or never existed"),
        (status = 400, description = "Invalid id", body = ApiErrorBody)
    )
)]
pub async fn delete_author(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path, INVALID_ID)?;
    data.authors
        .delete_author(id)
        .await
        .map_err(|e| ApiError::storage("delete author", e))?;
    Ok(HttpResponse::NoContent().finish())
}
