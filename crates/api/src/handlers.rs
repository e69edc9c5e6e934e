// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for user and authentication operations.

use larder_domain::{Email, validate_name};
use larder_persistence::{Persistence, PersistenceError, UserData};

use crate::auth::{AuthenticatedUser, AuthenticationService};
use crate::error::{ApiError, translate_domain_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CreateUserRequest, CreateUserResponse, ListUsersResponse, LoginRequest, LoginResponse,
    ProfileResponse, UpdateProfileRequest, UserSummary,
};

/// Registers a new user via the API boundary.
///
/// This function:
/// - Parses and normalizes the email (blank/malformed emails are rejected)
/// - Validates the display name
/// - Enforces the password policy
/// - Persists the user with a hashed password
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to create a user
///
/// # Returns
///
/// * `Ok(CreateUserResponse)` on success; the password never appears in it
/// * `Err(ApiError)` if validation fails or the email is already taken
///
/// # Errors
///
/// Returns an error if:
/// - The email is blank or malformed
/// - The name is empty
/// - The password violates the policy (shorter than 8 characters, or
///   matching the email/name)
/// - A user with this email already exists
pub fn create_user(
    persistence: &mut Persistence,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, ApiError> {
    let email: Email = Email::parse(&request.email).map_err(translate_domain_error)?;

    validate_name(&request.name).map_err(translate_domain_error)?;

    // Validate password policy before touching the database
    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(&request.password, email.value(), &request.name)?;

    let user_id: i64 = persistence
        .create_user(&email, &request.name, &request.password)
        .map_err(|e| match e {
            PersistenceError::DuplicateEmail(taken) => ApiError::DomainRuleViolation {
                rule: String::from("unique_email"),
                message: format!("A user with email '{taken}' already exists"),
            },
            other => ApiError::Internal {
                message: format!("Failed to create user: {other}"),
            },
        })?;

    Ok(CreateUserResponse {
        user_id,
        email: email.value().to_string(),
        name: request.name,
    })
}

/// Authenticates a user and issues a token.
///
/// The failure mode is deliberately uniform: a malformed email, an unknown
/// email, a blank password, and a wrong password all produce the same
/// authentication error, so callers cannot probe which accounts exist.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
///
/// # Returns
///
/// * `Ok(LoginResponse)` on success with the issued token
/// * `Err(ApiError)` if authentication fails
///
/// # Errors
///
/// Returns an error if the credentials do not verify.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let email: Email =
        Email::parse(&request.email).map_err(|_| ApiError::AuthenticationFailed {
            reason: String::from("Unable to authenticate with provided credentials"),
        })?;

    let (token, expires_at, user): (String, String, UserData) =
        AuthenticationService::login(persistence, &email, &request.password)?;

    Ok(LoginResponse {
        token,
        email: user.email,
        expires_at,
    })
}

/// Logs out by deleting the presented token.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `token` - The token to delete
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, token)?;
    Ok(())
}

/// Returns the authenticated user's profile.
///
/// # Arguments
///
/// * `user` - The user data from the validated token
#[must_use]
pub fn profile(user: &UserData) -> ProfileResponse {
    ProfileResponse {
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// Partially updates the authenticated user's profile.
///
/// A supplied name replaces the current one; a supplied password is checked
/// against the policy and re-hashed. Absent fields are left unchanged.
/// Issued tokens remain valid after a password change.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The partial update request
/// * `actor` - The authenticated user performing this action
///
/// # Returns
///
/// * `Ok(ProfileResponse)` with the updated profile
/// * `Err(ApiError)` if validation fails or the update fails
///
/// # Errors
///
/// Returns an error if:
/// - The new name is empty
/// - The new password violates the policy
/// - Database operations fail
pub fn update_profile(
    persistence: &mut Persistence,
    request: &UpdateProfileRequest,
    actor: &AuthenticatedUser,
) -> Result<ProfileResponse, ApiError> {
    if let Some(name) = &request.name {
        validate_name(name).map_err(translate_domain_error)?;

        persistence
            .update_name(actor.user_id, name)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to update name: {e}"),
            })?;
    }

    if let Some(password) = &request.password {
        // Validate against the post-update name
        let current: UserData = fetch_user(persistence, actor.user_id)?;

        let policy: PasswordPolicy = PasswordPolicy::default();
        policy.validate(password, &current.email, &current.name)?;

        persistence
            .update_password(actor.user_id, password)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to update password: {e}"),
            })?;
    }

    let updated: UserData = fetch_user(persistence, actor.user_id)?;

    Ok(ProfileResponse {
        name: updated.name,
        email: updated.email,
    })
}

/// Lists all users in insertion order.
///
/// Requires an authenticated caller; the server enforces that via the
/// token extractor before this function runs.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(persistence: &mut Persistence) -> Result<ListUsersResponse, ApiError> {
    let users: Vec<UserData> = persistence.list_users().map_err(|e| ApiError::Internal {
        message: format!("Failed to list users: {e}"),
    })?;

    let summaries: Vec<UserSummary> = users
        .into_iter()
        .map(|u| UserSummary {
            name: u.name,
            email: u.email,
        })
        .collect();

    Ok(ListUsersResponse { users: summaries })
}

/// Fetches a user by ID, mapping absence to a not-found API error.
fn fetch_user(persistence: &mut Persistence, user_id: i64) -> Result<UserData, ApiError> {
    persistence
        .get_user_by_id(user_id)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to fetch user: {e}"),
        })?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        })
}
