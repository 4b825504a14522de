use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Maximum length, in characters, of the `topic` and `keywords` request
/// fields. Requests exceeding this are rejected before any provider call.
pub const MAX_FIELD_CHARS: usize = 100;

/// Unique identifier for a post, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Create a new PostId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a PostId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A generated blog post.
///
/// Created by the generate operation, deleted by the delete operation when
/// the requester owns it. Never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Owning user. A delete takes effect only when this matches the
    /// caller's resolved user id.
    pub user_id: UserId,
    /// Subject the post was generated about (<= 100 chars).
    pub topic: String,
    /// Comma-separated target keywords.
    pub keywords: String,
    /// Generated title text.
    pub title: String,
    /// Generated SEO meta description.
    pub meta_description: String,
    /// Generated post body, HTML restricted to the allow-listed tags.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/posts/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePostRequest {
    pub topic: String,
    pub keywords: String,
}

/// Response body for a successful generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePostResponse {
    pub post_id: PostId,
}

/// Request body for `POST /api/v1/posts/delete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostRequest {
    pub post_id: String,
}

/// Response body for a delete, reporting the outcome explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct DeletePostResponse {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_roundtrip() {
        let id = PostId::new();
        let parsed: PostId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_generate_response_serde_shape() {
        let resp = GeneratePostResponse { post_id: PostId::new() };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("postId").is_some(), "field must serialize as postId");
    }

    #[test]
    fn test_delete_request_serde_shape() {
        let req: DeletePostRequest =
            serde_json::from_str(r#"{"postId":"0193e001-0000-7000-8000-000000000000"}"#).unwrap();
        assert_eq!(req.post_id, "0193e001-0000-7000-8000-000000000000");
    }

    #[test]
    fn test_post_ids_are_time_sortable() {
        let a = PostId::new();
        let b = PostId::new();
        assert!(a.0 <= b.0, "v7 UUIDs must be monotonically non-decreasing");
    }
}
