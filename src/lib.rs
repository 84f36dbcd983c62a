pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{delete, get, post},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid allowed origin: {}", origin);
                        None
                    }
                })
                .collect::<Vec<_>>(),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    // Read routes take an optional token; writes require one
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/user/me",
            get(handlers::users::get_current_user).patch(handlers::users::update_current_user),
        )
        .route(
            "/post",
            get(handlers::posts::get_posts).post(handlers::posts::create_post),
        )
        .route(
            "/post/{post_id}",
            get(handlers::posts::get_post)
                .patch(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route(
            "/post/{post_id}/comment",
            get(handlers::comments::get_post_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/comment/{comment_id}",
            delete(handlers::comments::delete_comment),
        )
        .route(
            "/vote",
            post(handlers::votes::vote).delete(handlers::votes::unvote),
        );

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
