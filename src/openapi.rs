use crate::error::ApiErrorBody;
use crate::models::{
    Author, Comment, NewAuthor, NewComment, NewPost, Post, UpdateAuthor, UpdateComment, UpdatePost,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::posts::create_post,
        crate::handlers::posts::list_posts,
        crate::handlers::posts::get_post,
        crate::handlers::posts::update_post,
        crate::handlers::posts::delete_post,
        crate::handlers::authors::create_author,
        crate::handlers::authors::list_authors,
        crate::handlers::authors::get_author,
        crate::handlers::authors::update_author,
        crate::handlers::authors::delete_author,
        crate::handlers::comments::create_comment,
        crate::handlers::comments::list_comments_for_post,
        crate::handlers::comments::get_comment,
        crate::handlers::comments::update_comment,
        crate::handlers::comments::delete_comment,
    ),
    components(schemas(
        Author, NewAuthor, UpdateAuthor,
        Post, NewPost, UpdatePost,
        Comment, NewComment, UpdateComment,
        ApiErrorBody
    )),
    tags(
        (name = "authors", description = "Author operations"),
        (name = "posts", description = "Post operations"),
        (name = "comments", description = "Comment operations"),
    )
)]
pub struct ApiDoc;

/// Where the generated document is served.
pub const OPENAPI_PATH: &str = "/openapi.json";

const METHODS: [&str; 5] = ["post", "get", "put", "patch", "delete"];

/// One `METHOD path` line per documented operation, plus the document itself.
/// Built from `ApiDoc` so the startup log follows the handlers' annotations.
pub fn route_summary() -> Vec<String> {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap_or_default();
    let mut lines = Vec::new();
    if let Some(paths) = doc.get("paths").and_then(|p| p.as_object()) {
        for (path, item) in paths {
            for method in METHODS.iter().filter(|m| item.get(**m).is_some()) {
                lines.push(format!("{:<6} {path}", method.to_uppercase()));
            }
        }
    }
    lines.push(format!("{:<6} {OPENAPI_PATH}", "GET"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in [
            "/posts",
            "/posts/{id}",
            "/posts/{postId}/comments",
            "/authors",
            "/authors/{id}",
            "/comments",
            "/comments/{id}",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        let author = &doc["components"]["schemas"]["Author"]["properties"];
        assert!(author.get("password_hash").is_none());
    }

    #[test]
    fn route_summary_lists_each_operation_once() {
        let lines = route_summary();
        assert_eq!(lines.len(), 16);
        for line in [
            "GET    /posts/{postId}/comments",
            "DELETE /authors/{id}",
            "POST   /comments",
            "PUT    /comments/{id}",
            "GET    /openapi.json",
        ] {
            assert!(lines.iter().any(|l| l == line), "missing {line:?} in {lines:?}");
        }
        assert!(!lines.iter().any(|l| l.starts_with("GET    /comments ")));
    }
}
