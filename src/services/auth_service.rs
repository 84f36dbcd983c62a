use chrono::Duration;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Claims, hash_password, verify_password},
    config::Config,
    error::{AppError, Result, conflict_on_unique_violation},
    models::{AuthResponse, RegisterRequest, User},
    services::user_service,
};

pub async fn register(
    db: &PgPool,
    config: &Config,
    request: &RegisterRequest,
) -> Result<AuthResponse> {
    if user_service::get_user_by_email(db, &request.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    if user_service::get_user_by_username(db, &request.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let password_hash = hash_blocking(request.password.clone(), config.bcrypt_cost).await?;
    let now = chrono::Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, username, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.email)
    .bind(&request.username)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
    .map_err(|e| conflict_on_unique_violation(e, "Email or username already exists"))?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    issue_token(user, config)
}

pub async fn login(
    db: &PgPool,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<AuthResponse> {
    let user = user_service::get_user_by_username(db, username)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

    if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
        return Err(AppError::Authentication("Invalid credentials".to_string()));
    }

    tracing::debug!(user_id = %user.id, "User logged in");

    issue_token(user, config)
}

pub fn verify(token: &str, jwt_secret: &str) -> Result<AuthUser> {
    Claims::verify(token, jwt_secret).map(AuthUser::from)
}

pub fn issue_token(user: User, config: &Config) -> Result<AuthResponse> {
    let token = Claims::new(&user, Duration::hours(config.jwt_expiry_hours))
        .encode(&config.jwt_secret)?;

    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

// bcrypt is CPU-bound; keep it off the async workers
pub async fn hash_blocking(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
}
