// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

/// API request to create a new user.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// The user's email address.
    pub email: String,
    /// The user's password (plain text in transit, hashed at rest).
    pub password: String,
    /// The user's display name.
    pub name: String,
}

/// API response for a successful user creation.
///
/// The password (and its hash) never appear here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserResponse {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The user's normalized email address.
    pub email: String,
    /// The user's display name.
    pub name: String,
}

/// API request to obtain an authentication token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The user's email address.
    pub email: String,
    /// The user's password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The issued token.
    pub token: String,
    /// The user's normalized email address.
    pub email: String,
    /// The token expiration timestamp (ISO 8601).
    pub expires_at: String,
}

/// API response describing the authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfileResponse {
    /// The user's display name.
    pub name: String,
    /// The user's normalized email address.
    pub email: String,
}

/// API request to partially update the authenticated user's profile.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// A new display name, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A new password, if present (will be re-hashed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A single user in a listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserSummary {
    /// The user's display name.
    pub name: String,
    /// The user's normalized email address.
    pub email: String,
}

/// API response listing all users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersResponse {
    /// All users, in insertion order.
    pub users: Vec<UserSummary>,
}
