use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, Result, conflict_on_unique_violation},
    models::{UpdateUserRequest, User},
    services::auth_service,
};

pub async fn get_user_by_id(db: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?;

    Ok(user)
}

pub async fn get_user_by_username(db: &PgPool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(db)
        .await?;

    Ok(user)
}

pub async fn get_user_by_email(db: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await?;

    Ok(user)
}

pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    patch: &UpdateUserRequest,
    bcrypt_cost: u32,
) -> Result<User> {
    let current = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if patch.is_empty() {
        return Ok(current);
    }

    if let Some(ref email) = patch.email {
        if let Some(other) = get_user_by_email(db, email).await? {
            if other.id != user_id {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }
    }

    if let Some(ref username) = patch.username {
        if let Some(other) = get_user_by_username(db, username).await? {
            if other.id != user_id {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }
    }

    let password_hash = match patch.password {
        Some(ref password) => Some(auth_service::hash_blocking(password.clone(), bcrypt_cost).await?),
        None => None,
    };

    let mut query = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = NOW()");
    if let Some(ref email) = patch.email {
        query.push(", email = ").push_bind(email.clone());
    }
    if let Some(ref username) = patch.username {
        query.push(", username = ").push_bind(username.clone());
    }
    if let Some(hash) = password_hash {
        query.push(", password_hash = ").push_bind(hash);
    }
    query.push(" WHERE id = ").push_bind(user_id);
    query.push(" RETURNING *");

    let user = query
        .build_query_as::<User>()
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique_violation(e, "Email or username already exists"))?;

    tracing::info!(user_id = %user.id, "User profile updated");

    Ok(user)
}
