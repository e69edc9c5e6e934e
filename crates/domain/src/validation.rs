// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Recipe;

/// Validates a user display name.
///
/// # Arguments
///
/// * `name` - The name to validate
///
/// # Errors
///
/// Returns an error if the name is empty or whitespace-only.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a recipe's basic field constraints.
///
/// This function checks field-level rules only. It does NOT check that the
/// owning user exists (that requires persistence context).
///
/// # Arguments
///
/// * `recipe` - The recipe to validate
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty
/// - The time estimate is not positive
pub fn validate_recipe_fields(recipe: &Recipe) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if recipe.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    // Rule: preparation time must be positive
    if recipe.time_minutes <= 0 {
        return Err(DomainError::InvalidTimeMinutes(String::from(
            "Time estimate must be greater than zero minutes",
        )));
    }

    Ok(())
}
