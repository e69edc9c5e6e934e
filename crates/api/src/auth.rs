// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and services.

use larder_domain::Email;
use larder_persistence::{Persistence, PersistenceError, TokenData, UserData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use crate::error::AuthError;

/// An authenticated user.
///
/// This represents a user whose token has been validated and who may
/// access authenticated endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's canonical database identifier.
    pub user_id: i64,
    /// The user's email address.
    pub email: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's canonical database identifier
    /// * `email` - The user's email address
    #[must_use]
    pub const fn new(user_id: i64, email: String) -> Self {
        Self { user_id, email }
    }
}

/// Authentication service for token-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default token expiration duration (30 days).
    const DEFAULT_TOKEN_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user and issues a token.
    ///
    /// Verifies the password against the stored bcrypt hash, issues an
    /// opaque token with an expiry, and records the login time. The
    /// failure reason is deliberately uniform so callers cannot probe
    /// which emails exist.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The user's email address
    /// * `password` - The plain-text password
    ///
    /// # Returns
    ///
    /// A tuple of (`token`, `expires_at`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or the password is
    /// blank.
    pub fn login(
        persistence: &mut Persistence,
        email: &Email,
        password: &str,
    ) -> Result<(String, String, UserData), AuthError> {
        // A blank password never authenticates
        if password.is_empty() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unable to authenticate with provided credentials"),
            });
        }

        // Retrieve user by email
        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unable to authenticate with provided credentials"),
            })?;

        // Verify the password hash
        let password_valid: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;

        if !password_valid {
            warn!(email = %email, "Password verification failed");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unable to authenticate with provided credentials"),
            });
        }

        // Generate token
        let token: String = Self::generate_token();

        // Calculate expiration time
        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + Self::DEFAULT_TOKEN_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        // Persist the token
        persistence
            .create_token(&token, user.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create token: {e}"),
            })?;

        // Record the login timestamp
        persistence
            .update_last_login(user.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        Ok((token, expires_at_str, user))
    }

    /// Validates a token and returns the authenticated user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `token` - The token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_user`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or expired.
    pub fn validate_token(
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<(AuthenticatedUser, UserData), AuthError> {
        // Retrieve token
        let stored: TokenData = persistence
            .get_token(token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid token"),
            })?;

        // Check if the token is expired
        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &stored.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse token expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Token expired"),
            });
        }

        // Retrieve the owning user
        let user: UserData = persistence
            .get_user_by_id(stored.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        debug!(email = %user.email, "Token validated");

        let authenticated_user: AuthenticatedUser =
            AuthenticatedUser::new(user.user_id, user.email.clone());

        Ok((authenticated_user, user))
    }

    /// Logs out by deleting the token.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `token` - The token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, token: &str) -> Result<(), AuthError> {
        persistence
            .delete_token(token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete token: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque token.
    ///
    /// Combines a nanosecond timestamp with random material so tokens are
    /// unique and not guessable from issue order alone.
    fn generate_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        format!(
            "{timestamp:x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::TokenExpired(msg) | PersistenceError::TokenNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
