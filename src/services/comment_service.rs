use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result, not_found_on_foreign_key_violation},
    models::{Comment, CommentResponse, CreateCommentRequest},
    services::post_service,
};

pub async fn get_comment_by_id_raw(db: &PgPool, comment_id: Uuid) -> Result<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
        .bind(comment_id)
        .fetch_optional(db)
        .await?;

    Ok(comment)
}

pub async fn create_comment(
    db: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    request: &CreateCommentRequest,
) -> Result<Uuid> {
    post_service::get_post_by_id_raw(db, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    // If replying to a comment, it must live on the same post
    if let Some(parent_id) = request.parent_id {
        let parent = get_comment_by_id_raw(db, parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parent comment not found".to_string()))?;

        if parent.post_id != post_id {
            return Err(AppError::Validation(
                "parentId: Parent comment is not on the same post".to_string(),
            ));
        }
    }

    let comment_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, user_id, parent_id, comment, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .bind(user_id)
    .bind(request.parent_id)
    .bind(&request.comment)
    .bind(now)
    .bind(now)
    .execute(db)
    .await
    .map_err(|e| not_found_on_foreign_key_violation(e, "Post or parent comment not found"))?;

    tracing::info!(%comment_id, %post_id, %user_id, "Comment created");

    Ok(comment_id)
}

/// All comments of a post in creation order. Threads are rebuilt by the
/// caller from `parent_id`.
pub async fn get_post_comments(
    db: &PgPool,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Vec<CommentResponse>> {
    post_service::get_post_by_id_raw(db, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let comments = sqlx::query_as::<_, CommentResponse>(
        r#"
        SELECT
            c.id, c.post_id, c.user_id, c.parent_id, c.comment, c.created_at, c.updated_at,
            u.username,
            (SELECT COUNT(*) FROM votes v
                WHERE v.target_type = 'comment' AND v.target_id = c.id AND v.direction = 'up') AS upvotes,
            (SELECT COUNT(*) FROM votes v
                WHERE v.target_type = 'comment' AND v.target_id = c.id AND v.direction = 'down') AS downvotes,
            (SELECT v.direction FROM votes v
                WHERE v.target_type = 'comment' AND v.target_id = c.id AND v.user_id = $2) AS vote_status
        FROM comments c
        JOIN users u ON c.user_id = u.id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(post_id)
    .bind(viewer_id)
    .fetch_all(db)
    .await?;

    Ok(comments)
}

pub async fn delete_comment(db: &PgPool, comment_id: Uuid, requester_id: Uuid) -> Result<()> {
    let comment = get_comment_by_id_raw(db, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if comment.user_id != requester_id {
        return Err(AppError::Authorization(
            "You can only delete your own comments".to_string(),
        ));
    }

    // Replies cascade; their votes are removed by the delete_target_votes trigger
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(db)
        .await?;

    tracing::info!(%comment_id, "Comment deleted");

    Ok(())
}
