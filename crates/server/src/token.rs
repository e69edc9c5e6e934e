// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Token extraction and authentication for the server.
//!
//! This module provides an Axum extractor for validating authentication
//! tokens and enforcing authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use larder_api::{AuthenticatedUser, AuthenticationService};
use larder_persistence::UserData;
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for authenticated users.
///
/// This extractor validates the token from the Authorization header and
/// returns the authenticated user context.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Token <token>` header
/// 2. Validate the token via `AuthenticationService::validate_token`
/// 3. Check token expiration
/// 4. Return the authenticated user, the full user row, and the raw token
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - The Authorization header is missing
/// - The Authorization header format is invalid
/// - The token is unknown
/// - The token is expired
pub struct TokenUser {
    /// The authenticated principal.
    pub actor: AuthenticatedUser,
    /// The full user row for the principal.
    pub user: UserData,
    /// The raw token presented by the client (needed for logout).
    pub token: String,
}

impl FromRequestParts<AppState> for TokenUser {
    type Rejection = TokenError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                TokenError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                TokenError::InvalidAuthorizationHeader
            })?;

        // Parse the token scheme
        let token = auth_header.strip_prefix("Token ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Token '");
            TokenError::InvalidAuthorizationHeader
        })?;

        // Validate the token
        let mut persistence = state.persistence.lock().await;
        let (actor, user) = AuthenticationService::validate_token(&mut persistence, token)
            .map_err(|e| {
                warn!(error = %e, "Token validation failed");
                TokenError::InvalidToken(e.to_string())
            })?;

        debug!(email = %user.email, "Token validated successfully");

        Ok(Self {
            actor,
            user,
            token: token.to_string(),
        })
    }
}

/// Token extraction errors.
///
/// These errors are returned when token validation fails and are
/// automatically converted to HTTP responses.
#[derive(Debug)]
pub enum TokenError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Token validation failed.
    InvalidToken(String),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Token <token>'",
            ),
            Self::InvalidToken(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Token validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
