use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{CreatePostRequest, Post, PostPatch, PostResponse, PostSort},
};

// Author username, comment count, vote counts and the viewer's own vote ($1)
const POST_SELECT: &str = r#"
    SELECT
        p.id, p.user_id, p.title, p.text, p.url, p.created_at, p.updated_at,
        u.username,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
        (SELECT COUNT(*) FROM votes v
            WHERE v.target_type = 'post' AND v.target_id = p.id AND v.direction = 'up') AS upvotes,
        (SELECT COUNT(*) FROM votes v
            WHERE v.target_type = 'post' AND v.target_id = p.id AND v.direction = 'down') AS downvotes,
        (SELECT v.direction FROM votes v
            WHERE v.target_type = 'post' AND v.target_id = p.id AND v.user_id = $1) AS vote_status
    FROM posts p
    JOIN users u ON p.user_id = u.id
"#;

pub async fn get_post_by_id_raw(db: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(db)
        .await?;

    Ok(post)
}

pub async fn create_post(db: &PgPool, user_id: Uuid, request: &CreatePostRequest) -> Result<Uuid> {
    let post_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, user_id, title, text, url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(&request.title)
    .bind(&request.text)
    .bind(&request.url)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    tracing::info!(%post_id, %user_id, "Post created");

    Ok(post_id)
}

pub async fn get_post_by_id(
    db: &PgPool,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Option<PostResponse>> {
    let query = format!("{} WHERE p.id = $2", POST_SELECT);

    let post = sqlx::query_as::<_, PostResponse>(&query)
        .bind(viewer_id)
        .bind(post_id)
        .fetch_optional(db)
        .await?;

    Ok(post)
}

/// Lists posts with their derived fields. A `limit` of `None` returns every
/// post.
pub async fn get_posts(
    db: &PgPool,
    viewer_id: Option<Uuid>,
    sort: PostSort,
    limit: Option<u32>,
    offset: u32,
) -> Result<Vec<PostResponse>> {
    let query = format!(
        "SELECT * FROM ({}) AS p ORDER BY {} LIMIT $2 OFFSET $3",
        POST_SELECT,
        sort.order_clause()
    );

    let posts = sqlx::query_as::<_, PostResponse>(&query)
        .bind(viewer_id)
        .bind(limit.map(i64::from))
        .bind(i64::from(offset))
        .fetch_all(db)
        .await?;

    Ok(posts)
}

async fn get_owned_post(db: &PgPool, post_id: Uuid, requester_id: Uuid) -> Result<Post> {
    let post = get_post_by_id_raw(db, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.user_id != requester_id {
        return Err(AppError::Authorization(
            "Can only modify your own posts".to_string(),
        ));
    }

    Ok(post)
}

pub async fn update_post(
    db: &PgPool,
    post_id: Uuid,
    requester_id: Uuid,
    patch: &PostPatch,
) -> Result<PostResponse> {
    get_owned_post(db, post_id, requester_id).await?;

    if !patch.is_empty() {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE posts SET updated_at = ");
        query.push_bind(chrono::Utc::now());
        if let Some(ref title) = patch.title {
            query.push(", title = ").push_bind(title.clone());
        }
        if let Some(ref text) = patch.text {
            query.push(", text = ").push_bind(text.clone());
        }
        if let Some(ref url) = patch.url {
            query.push(", url = ").push_bind(url.clone());
        }
        query.push(" WHERE id = ").push_bind(post_id);

        query.build().execute(db).await?;
        tracing::info!(%post_id, "Post updated");
    }

    get_post_by_id(db, post_id, Some(requester_id))
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

pub async fn delete_post(db: &PgPool, post_id: Uuid, requester_id: Uuid) -> Result<()> {
    get_owned_post(db, post_id, requester_id).await?;

    // Comments cascade; votes on the post and its comments go with them via
    // the delete_target_votes trigger
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(db)
        .await?;

    tracing::info!(%post_id, "Post deleted");

    Ok(())
}
