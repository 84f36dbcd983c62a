use axum::{extract::State, http::StatusCode, response::Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    auth::{AuthUser, OptionalAuthUser},
    error::Result,
    extract::{AppJson, AppPath},
    models::{CommentResponse, CreateCommentRequest, CreatedComment},
    services::comment_service,
};

pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(post_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CreatedComment>)> {
    payload.validate()?;

    let comment_id =
        comment_service::create_comment(&state.db, post_id, auth_user.user_id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedComment {
            message: "Comment created successfully".to_string(),
            comment_id,
        }),
    ))
}

pub async fn get_post_comments(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<Uuid>,
    auth_user: OptionalAuthUser,
) -> Result<Json<Vec<CommentResponse>>> {
    let comments =
        comment_service::get_post_comments(&state.db, post_id, auth_user.user_id()).await?;

    Ok(Json(comments))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(comment_id): AppPath<Uuid>,
) -> Result<StatusCode> {
    comment_service::delete_comment(&state.db, comment_id, auth_user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
