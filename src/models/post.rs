use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::{VoteDirection, deserialize_nullable, not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub text: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Create post request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Url is invalid"))]
    pub url: Option<String>,
}

/// Partial update of a post. An absent field is left untouched; for the
/// nullable columns an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<Option<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.url.is_none()
    }
}

// Post with author and derived aggregates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub text: Option<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    #[serde(with = "crate::models::count")]
    pub comment_count: i64,
    #[serde(with = "crate::models::count")]
    pub upvotes: i64,
    #[serde(with = "crate::models::count")]
    pub downvotes: i64,
    #[serde(default, with = "crate::models::vote_status")]
    pub vote_status: Option<VoteDirection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPost {
    pub message: String,
    pub post_id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSort {
    #[default]
    New,
    Old,
    Top,
}

impl PostSort {
    pub fn order_clause(self) -> &'static str {
        match self {
            PostSort::New => "p.created_at DESC, p.id",
            PostSort::Old => "p.created_at ASC, p.id",
            PostSort::Top => "p.upvotes - p.downvotes DESC, p.created_at DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: PostPatch = serde_json::from_value(json!({ "title": "x", "url": null })).unwrap();

        assert_eq!(patch.title.as_deref(), Some("x"));
        assert_eq!(patch.text, None);
        assert_eq!(patch.url, Some(None));
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch_is_empty() {
        let patch: PostPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = PostPatch {
            title: Some("x".into()),
            text: Some(None),
            url: None,
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "title": "x", "text": null }));
    }

    #[test]
    fn blank_titles_are_rejected() {
        let request = CreatePostRequest {
            title: "   ".into(),
            text: None,
            url: None,
        };
        assert!(request.validate().is_err());

        let patch = PostPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn post_url_must_be_a_url() {
        let request = CreatePostRequest {
            title: "A link".into(),
            text: None,
            url: Some("not a url".into()),
        };
        assert!(request.validate().is_err());

        let request = CreatePostRequest {
            url: Some("https://example.com/article".into()),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn comment_count_serializes_as_string() {
        let post = PostResponse {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Hello".into(),
            text: Some("body".into()),
            url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            username: "alice1".into(),
            comment_count: 0,
            upvotes: 2,
            downvotes: 1,
            vote_status: None,
        };
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["comment_count"], "0");
        assert_eq!(value["upvotes"], "2");
        assert_eq!(value["vote_status"], serde_json::Value::Null);
    }

    #[test]
    fn vote_status_is_a_boolean_on_the_wire() {
        let post: PostResponse = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "title": "Hello",
            "text": null,
            "url": null,
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
            "username": "alice1",
            "comment_count": "0",
            "upvotes": "0",
            "downvotes": "1",
            "vote_status": false
        }))
        .unwrap();
        assert_eq!(post.vote_status, Some(VoteDirection::Down));

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["vote_status"], false);
    }
}
