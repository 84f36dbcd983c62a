use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{VoteDirection, VoteTally, VoteTarget},
};

/// Takes a `FOR KEY SHARE` lock on the target row for the rest of the
/// transaction. A concurrent delete of the target waits for the vote to commit
/// (and then removes it); a vote arriving after the delete finds no row.
async fn lock_target<'e, E>(executor: E, target_type: VoteTarget, target_id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let query = match target_type {
        VoteTarget::Post => "SELECT 1 FROM posts WHERE id = $1 FOR KEY SHARE",
        VoteTarget::Comment => "SELECT 1 FROM comments WHERE id = $1 FOR KEY SHARE",
    };

    let locked: Option<i32> = sqlx::query_scalar(query)
        .bind(target_id)
        .fetch_optional(executor)
        .await?;

    Ok(locked.is_some())
}

fn target_not_found(target_type: VoteTarget) -> AppError {
    match target_type {
        VoteTarget::Post => AppError::NotFound("Post not found".to_string()),
        VoteTarget::Comment => AppError::NotFound("Comment not found".to_string()),
    }
}

pub async fn tally<'e, E>(executor: E, target_type: VoteTarget, target_id: Uuid) -> Result<VoteTally>
where
    E: PgExecutor<'e>,
{
    let tally = sqlx::query_as::<_, VoteTally>(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE direction = 'up') AS upvotes,
            COUNT(*) FILTER (WHERE direction = 'down') AS downvotes
        FROM votes
        WHERE target_type = $1 AND target_id = $2
        "#,
    )
    .bind(target_type)
    .bind(target_id)
    .fetch_one(executor)
    .await?;

    Ok(tally)
}

/// Records `direction` as the user's vote on the target. Repeating the same
/// vote leaves the counts unchanged; the opposite direction flips it.
pub async fn vote(
    db: &PgPool,
    user_id: Uuid,
    target_type: VoteTarget,
    target_id: Uuid,
    direction: VoteDirection,
) -> Result<VoteTally> {
    let mut tx = db.begin().await?;

    if !lock_target(&mut *tx, target_type, target_id).await? {
        return Err(target_not_found(target_type));
    }

    sqlx::query(
        r#"
        INSERT INTO votes (user_id, target_type, target_id, direction, created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        ON CONFLICT (user_id, target_type, target_id)
        DO UPDATE SET direction = EXCLUDED.direction, updated_at = NOW()
        WHERE votes.direction <> EXCLUDED.direction
        "#,
    )
    .bind(user_id)
    .bind(target_type)
    .bind(target_id)
    .bind(direction)
    .execute(&mut *tx)
    .await?;

    let counts = tally(&mut *tx, target_type, target_id).await?;
    tx.commit().await?;

    tracing::debug!(%user_id, ?target_type, %target_id, ?direction, "Vote recorded");

    Ok(counts)
}

/// Removes the user's vote on the target, if any.
pub async fn unvote(
    db: &PgPool,
    user_id: Uuid,
    target_type: VoteTarget,
    target_id: Uuid,
) -> Result<VoteTally> {
    let mut tx = db.begin().await?;

    if !lock_target(&mut *tx, target_type, target_id).await? {
        return Err(target_not_found(target_type));
    }

    sqlx::query("DELETE FROM votes WHERE user_id = $1 AND target_type = $2 AND target_id = $3")
        .bind(user_id)
        .bind(target_type)
        .bind(target_id)
        .execute(&mut *tx)
        .await?;

    let counts = tally(&mut *tx, target_type, target_id).await?;
    tx.commit().await?;

    tracing::debug!(%user_id, ?target_type, %target_id, "Vote removed");

    Ok(counts)
}
