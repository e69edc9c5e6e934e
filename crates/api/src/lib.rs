// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Larder recipe backend.
//!
//! This crate sits between the HTTP server and the persistence layer. It
//! owns the API contract (request/response DTOs), credential verification
//! and token lifecycle, password policy, and the translation of domain and
//! persistence errors into API errors. Nothing in this crate knows about
//! HTTP; status mapping lives in the server.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use handlers::{create_user, list_users, login, logout, profile, update_profile};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CreateUserRequest, CreateUserResponse, ListUsersResponse, LoginRequest, LoginResponse,
    ProfileResponse, UpdateProfileRequest, UserSummary,
};
