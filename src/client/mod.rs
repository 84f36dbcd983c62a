//! Typed HTTP client for the board API.
//!
//! Every gateway route has one method here. Non-2xx responses are decoded
//! from the gateway's `{"error", "status"}` body into [`ClientError::Api`].

pub mod thread;

pub use thread::{CommentNode, build_thread};

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AuthResponse, CommentResponse, CreateCommentRequest, CreatePostRequest, CreatedComment,
    CreatedPost, LoginRequest, PostPatch, PostResponse, RegisterRequest, UnvoteRequest,
    UpdateUserRequest, UserResponse, VoteRequest, VoteTally,
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}/api{}", self.base_url, path));

        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<T> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(builder: RequestBuilder) -> ClientResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Err(ClientError::Api { status, message })
    }

    /// Registers and keeps the returned token for later calls.
    pub async fn register(&mut self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse =
            Self::send(self.request(Method::POST, "/auth/register").json(request)).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// Logs in and keeps the returned token for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse =
            Self::send(self.request(Method::POST, "/auth/login").json(&request)).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    pub async fn me(&self) -> ClientResult<UserResponse> {
        Self::send(self.request(Method::GET, "/user/me")).await
    }

    pub async fn update_me(&self, patch: &UpdateUserRequest) -> ClientResult<UserResponse> {
        Self::send(self.request(Method::PATCH, "/user/me").json(patch)).await
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> ClientResult<Uuid> {
        let created: CreatedPost =
            Self::send(self.request(Method::POST, "/post").json(request)).await?;
        Ok(created.post_id)
    }

    pub async fn get_post(&self, post_id: Uuid) -> ClientResult<PostResponse> {
        Self::send(self.request(Method::GET, &format!("/post/{}", post_id))).await
    }

    pub async fn list_posts(&self) -> ClientResult<Vec<PostResponse>> {
        Self::send(self.request(Method::GET, "/post")).await
    }

    pub async fn update_post(&self, post_id: Uuid, patch: &PostPatch) -> ClientResult<PostResponse> {
        Self::send(
            self.request(Method::PATCH, &format!("/post/{}", post_id))
                .json(patch),
        )
        .await
    }

    pub async fn delete_post(&self, post_id: Uuid) -> ClientResult<()> {
        Self::send_empty(self.request(Method::DELETE, &format!("/post/{}", post_id))).await
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        request: &CreateCommentRequest,
    ) -> ClientResult<Uuid> {
        let created: CreatedComment = Self::send(
            self.request(Method::POST, &format!("/post/{}/comment", post_id))
                .json(request),
        )
        .await?;
        Ok(created.comment_id)
    }

    pub async fn list_comments(&self, post_id: Uuid) -> ClientResult<Vec<CommentResponse>> {
        Self::send(self.request(Method::GET, &format!("/post/{}/comment", post_id))).await
    }

    /// Fetches a post's comments and rebuilds the reply tree.
    pub async fn comment_thread(&self, post_id: Uuid) -> ClientResult<Vec<CommentNode>> {
        Ok(build_thread(self.list_comments(post_id).await?))
    }

    pub async fn delete_comment(&self, comment_id: Uuid) -> ClientResult<()> {
        Self::send_empty(self.request(Method::DELETE, &format!("/comment/{}", comment_id))).await
    }

    pub async fn vote(&self, request: &VoteRequest) -> ClientResult<VoteTally> {
        Self::send(self.request(Method::POST, "/vote").json(request)).await
    }

    pub async fn unvote(&self, request: &UnvoteRequest) -> ClientResult<VoteTally> {
        Self::send(self.request(Method::DELETE, "/vote").json(request)).await
    }
}
