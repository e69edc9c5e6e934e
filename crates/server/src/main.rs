// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use larder_api::{
    ApiError, CreateUserRequest, CreateUserResponse, ListUsersResponse, LoginRequest,
    LoginResponse, ProfileResponse, UpdateProfileRequest, create_user, list_users, login, logout,
    profile, update_profile,
};
use larder_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

mod token;

use token::TokenUser;

/// Larder Server - HTTP server for the Larder recipe backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for users, tokens, and recipes.
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// API response for operations that only report success.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            // Login failures surface as request validation errors (400),
            // matching the API contract; missing/invalid tokens are
            // rejected with 401 by the extractor before handlers run.
            ApiError::AuthenticationFailed { .. }
            | ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidInput { .. }
            | ApiError::PasswordPolicyViolation { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

/// Handler for POST `/user/create/` endpoint.
///
/// Creates a new user and responds with 201 on success.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), HttpError> {
    info!(email = %req.email, "Handling create_user request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateUserResponse = create_user(&mut persistence, req)?;
    drop(persistence);

    info!(
        user_id = response.user_id,
        email = %response.email,
        "Successfully created user"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/user/login/` endpoint.
///
/// Verifies credentials and responds with a fresh token.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req)?;
    drop(persistence);

    info!(email = %response.email, "Successfully issued token");

    Ok(Json(response))
}

/// Handler for GET `/user/update/` endpoint.
///
/// Returns the authenticated user's profile.
#[allow(clippy::unused_async)] // the extractor already did the async work
async fn handle_get_profile(token_user: TokenUser) -> Json<ProfileResponse> {
    info!(email = %token_user.user.email, "Handling get_profile request");

    Json(profile(&token_user.user))
}

/// Handler for PATCH `/user/update/` endpoint.
///
/// Partially updates the authenticated user's profile.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    token_user: TokenUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    info!(email = %token_user.user.email, "Handling update_profile request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ProfileResponse = update_profile(&mut persistence, &req, &token_user.actor)?;
    drop(persistence);

    info!(email = %response.email, "Successfully updated profile");

    Ok(Json(response))
}

/// Handler for GET `/user/users/` endpoint.
///
/// Lists all users in insertion order.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    _token_user: TokenUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    info!("Handling list_users request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = list_users(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/user/logout/` endpoint.
///
/// Deletes the presented token.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    token_user: TokenUser,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(email = %token_user.user.email, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &token_user.token)?;
    drop(persistence);

    Ok(Json(MessageResponse {
        success: true,
        message: Some(String::from("Logged out successfully")),
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/user/create/", post(handle_create_user))
        .route(
            "/user/update/",
            get(handle_get_profile).patch(handle_update_profile),
        )
        .route("/user/login/", post(handle_login))
        .route("/user/logout/", post(handle_logout))
        .route("/user/users/", get(handle_list_users))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Larder Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    // Drop any tokens that expired while the server was down
    let purged: usize = persistence.delete_expired_tokens()?;
    info!(purged, "Purged expired tokens");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
