use axum::{extract::State, response::Json};
use validator::Validate;

use crate::{
    AppState,
    auth::AuthUser,
    error::{AppError, Result},
    extract::AppJson,
    models::{UpdateUserRequest, UserResponse},
    services::user_service,
};

pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>> {
    let user = user_service::get_user_by_id(&state.db, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

pub async fn update_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    payload.validate()?;

    let user = user_service::update_profile(
        &state.db,
        auth_user.user_id,
        &payload,
        state.config.bcrypt_cost,
    )
    .await?;

    Ok(Json(user.into()))
}
