// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email address is blank or malformed.
    InvalidEmail(String),
    /// User name is empty or invalid.
    InvalidName(String),
    /// Recipe title is empty or invalid.
    InvalidTitle(String),
    /// Recipe time estimate is invalid.
    InvalidTimeMinutes(String),
    /// A user with this email already exists.
    DuplicateEmail {
        /// The duplicate email address.
        email: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidTimeMinutes(msg) => write!(f, "Invalid time estimate: {msg}"),
            Self::DuplicateEmail { email } => {
                write!(f, "A user with email '{email}' already exists")
            }
        }
    }
}

impl std::error::Error for DomainError {}
