use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

pub type Id = i64;

fn default_role() -> String {
    "author".to_string()
}

/// Optional text fields treat an explicit `null` the same as a missing key.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn null_as_default_role<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_role))
}

/// Outward representation of an author. The password hash is stored but never
/// selected back out, so it has no field here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Author {
    pub id: Id,
    pub username: String,
    #[serde(rename = "name")]
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub bio: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewAuthor {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(rename = "name", default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default = "default_role", deserialize_with = "null_as_default_role")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar_url: String,
}

/// Partial update; absent fields keep their stored value. `username` and the
/// password hash are not updatable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAuthor {
    #[serde(rename = "name")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub cover_image: String,
    pub author_id: Id, // not checked against authors here; the FK lives in storage
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cover_image: String,
    pub author_id: Id,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub author_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewComment {
    pub post_id: Id,
    pub author_id: Id,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateComment {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_author_fills_optional_fields() {
        let a: NewAuthor = serde_json::from_str(
            r#"{"username":"ana","email":"ana@x.com","password_hash":"h1"}"#,
        )
        .unwrap();
        assert_eq!(a.role, "author");
        assert_eq!(a.full_name, "");
        assert_eq!(a.password_hash, "h1");
    }

    #[test]
    fn full_name_travels_as_name() {
        let a: NewAuthor = serde_json::from_str(
            r#"{"username":"ana","email":"a@x.com","password_hash":"h","name":"Ana Lima"}"#,
        )
        .unwrap();
        assert_eq!(a.full_name, "Ana Lima");
        let u: UpdateAuthor = serde_json::from_str(r#"{"name":"Ana B"}"#).unwrap();
        assert_eq!(u.full_name.as_deref(), Some("Ana B"));
    }

    #[test]
    fn null_optional_text_reads_as_default() {
        let a: NewAuthor = serde_json::from_str(
            r#"{"username":"ana","email":"a@x.com","password_hash":"h",
                "name":null,"role":null,"bio":null,"avatar_url":null}"#,
        )
        .unwrap();
        assert_eq!((a.full_name.as_str(), a.bio.as_str(), a.avatar_url.as_str()), ("", "", ""));
        assert_eq!(a.role, "author");

        let p: NewPost =
            serde_json::from_str(r#"{"title":"T","content":"C","cover_image":null,"author_id":1}"#)
                .unwrap();
        assert_eq!(p.cover_image, "");
    }

    #[test]
    fn new_post_requires_author_id() {
        let err = serde_json::from_str::<NewPost>(r#"{"title":"T","content":"C"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn author_json_has_no_password_key() {
        let now = Utc::now();
        let a = Author {
            id: 1,
            username: "ana".into(),
            full_name: String::new(),
            email: "ana@x.com".into(),
            role: "author".into(),
            bio: String::new(),
            avatar_url: String::new(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        let v = serde_json::to_value(&a).unwrap();
        assert!(v.get("password_hash").is_none());
        assert!(v.get("full_name").is_none());
        assert_eq!(v["name"], "");
        assert_eq!(v["is_active"], true);
    }
}
