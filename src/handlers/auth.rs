use axum::{extract::State, http::StatusCode, response::Json};
use validator::Validate;

use crate::{
    AppState,
    error::Result,
    extract::AppJson,
    models::{AuthResponse, LoginRequest, RegisterRequest},
    services::auth_service,
};

pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let response = auth_service::register(&state.db, &state.config, &payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let response =
        auth_service::login(&state.db, &state.config, &payload.username, &payload.password)
            .await?;

    Ok(Json(response))
}
