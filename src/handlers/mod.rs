pub mod auth;
pub mod comments;
pub mod health;
pub mod posts;
pub mod users;
pub mod votes;

use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
