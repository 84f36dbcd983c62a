use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::{AppState, error::Result};

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    sqlx::query("SELECT 1").execute(&state.db).await?;

    Ok(Json(json!({ "status": "ok" })))
}
