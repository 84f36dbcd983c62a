use axum::{extract::State, response::Json};

use crate::{
    AppState,
    auth::AuthUser,
    error::Result,
    extract::AppJson,
    models::{UnvoteRequest, VoteRequest, VoteTally},
    services::vote_service,
};

pub async fn vote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<VoteRequest>,
) -> Result<Json<VoteTally>> {
    let tally = vote_service::vote(
        &state.db,
        auth_user.user_id,
        payload.target_type,
        payload.target_id,
        payload.direction,
    )
    .await?;

    Ok(Json(tally))
}

pub async fn unvote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<UnvoteRequest>,
) -> Result<Json<VoteTally>> {
    let tally = vote_service::unvote(
        &state.db,
        auth_user.user_id,
        payload.target_type,
        payload.target_id,
    )
    .await?;

    Ok(Json(tally))
}
