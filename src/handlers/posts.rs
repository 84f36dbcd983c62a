use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidateUrl};

use crate::{
    AppState,
    auth::{AuthUser, OptionalAuthUser},
    error::{AppError, Result},
    extract::{AppJson, AppPath, AppQuery},
    models::{CreatePostRequest, CreatedPost, PostPatch, PostResponse, PostSort},
    services::post_service,
};

#[derive(Debug, Deserialize)]
pub struct GetPostsQuery {
    pub sort: Option<PostSort>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub async fn create_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPost>)> {
    payload.validate()?;

    let post_id = post_service::create_post(&state.db, auth_user.user_id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedPost {
            message: "Post created successfully".to_string(),
            post_id,
        }),
    ))
}

pub async fn get_posts(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GetPostsQuery>,
    auth_user: OptionalAuthUser,
) -> Result<Json<Vec<PostResponse>>> {
    let posts = post_service::get_posts(
        &state.db,
        auth_user.user_id(),
        params.sort.unwrap_or_default(),
        params.limit.map(|limit| limit.min(100)),
        params.offset.unwrap_or(0),
    )
    .await?;

    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<Uuid>,
    auth_user: OptionalAuthUser,
) -> Result<Json<PostResponse>> {
    let post = post_service::get_post_by_id(&state.db, post_id, auth_user.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(post_id): AppPath<Uuid>,
    AppJson(payload): AppJson<PostPatch>,
) -> Result<Json<PostResponse>> {
    payload.validate()?;

    if let Some(Some(ref url)) = payload.url {
        if !url.validate_url() {
            return Err(AppError::Validation("url: Url is invalid".to_string()));
        }
    }

    let post = post_service::update_post(&state.db, post_id, auth_user.user_id, &payload).await?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppPath(post_id): AppPath<Uuid>,
) -> Result<StatusCode> {
    post_service::delete_post(&state.db, post_id, auth_user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
