// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a validated, normalized email address.
///
/// The domain portion is normalized to lowercase; the local part is
/// preserved as entered. Two emails are equal if their normalized
/// forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email {
    /// The normalized email value.
    value: String,
}

impl Email {
    /// Parses and normalizes an email address.
    ///
    /// # Arguments
    ///
    /// * `value` - The raw email address
    ///
    /// # Errors
    ///
    /// Returns an error if the email is blank, contains whitespace, or is
    /// not of the form `local@domain` with both parts non-empty.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email cannot be blank",
            )));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidEmail(String::from(
                "Email cannot contain whitespace",
            )));
        }

        let Some((local, domain)) = value.rsplit_once('@') else {
            return Err(DomainError::InvalidEmail(String::from(
                "Email must contain '@'",
            )));
        };

        if local.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email local part cannot be empty",
            )));
        }

        if domain.is_empty() {
            return Err(DomainError::InvalidEmail(String::from(
                "Email domain cannot be empty",
            )));
        }

        // Only the domain portion is case-normalized
        Ok(Self {
            value: format!("{local}@{}", domain.to_lowercase()),
        })
    }

    /// Returns the normalized email value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a user of the system.
///
/// The password hash is deliberately NOT part of the domain type. Hashes
/// live in the persistence layer and are never exposed through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the user has not been persisted yet.
    pub user_id: Option<i64>,
    /// The user's email address (unique identifier for login).
    pub email: Email,
    /// The user's display name.
    pub name: String,
    /// Whether the user may access staff-only functionality.
    pub is_staff: bool,
    /// Whether the user has unrestricted access.
    pub is_superuser: bool,
}

impl User {
    /// Creates a new, unpersisted user with both privilege flags false.
    #[must_use]
    pub const fn new(email: Email, name: String) -> Self {
        Self {
            user_id: None,
            email,
            name,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Creates a new, unpersisted superuser.
    ///
    /// Superusers carry both `is_staff` and `is_superuser`.
    #[must_use]
    pub const fn new_superuser(email: Email, name: String) -> Self {
        Self {
            user_id: None,
            email,
            name,
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Represents a recipe owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the recipe has not been persisted yet.
    pub recipe_id: Option<i64>,
    /// The owning user's identifier.
    pub user_id: i64,
    /// The recipe title.
    pub title: String,
    /// Estimated preparation time in minutes.
    pub time_minutes: i32,
    /// The price, as a fixed-point decimal.
    pub price: Decimal,
    /// Free-form description.
    pub description: String,
}

impl Recipe {
    /// Creates a new, unpersisted recipe.
    #[must_use]
    pub const fn new(
        user_id: i64,
        title: String,
        time_minutes: i32,
        price: Decimal,
        description: String,
    ) -> Self {
        Self {
            recipe_id: None,
            user_id,
            title,
            time_minutes,
            price,
            description,
        }
    }
}

// A recipe displays as its title.
impl std::fmt::Display for Recipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
