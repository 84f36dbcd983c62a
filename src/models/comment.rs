use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::{VoteDirection, not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Create comment request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 10000, message = "Comment must be between 1 and 10000 characters"),
        custom(function = "not_blank")
    )]
    pub comment: String,
    #[serde(
        default,
        rename = "parentId",
        alias = "parent_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Uuid>,
}

// Comment with author and derived aggregates; replies are linked by parentId
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentResponse {
    pub id: Uuid,
    #[serde(rename = "postId", alias = "post_id")]
    pub post_id: Uuid,
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: Uuid,
    #[serde(rename = "parentId", alias = "parent_id")]
    pub parent_id: Option<Uuid>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    #[serde(with = "crate::models::count")]
    pub upvotes: i64,
    #[serde(with = "crate::models::count")]
    pub downvotes: i64,
    #[serde(default, with = "crate::models::vote_status")]
    pub vote_status: Option<VoteDirection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedComment {
    pub message: String,
    pub comment_id: Uuid,
}
