// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use larder_domain::Email;
use tracing::{debug, info};

use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new user.
///
/// The password is hashed with bcrypt before storage; the plain text is
/// never persisted. The email arrives pre-normalized via the `Email`
/// domain type.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The user's validated email address
/// * `name` - The user's display name
/// * `password` - The plain-text password (will be hashed)
/// * `is_staff` - Whether the user may access staff-only functionality
/// * `is_superuser` - Whether the user has unrestricted access
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmail` if a user with this email
/// already exists, or another error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    email: &Email,
    name: &str,
    password: &str,
    is_staff: bool,
    is_superuser: bool,
) -> Result<i64, PersistenceError> {
    info!(email = %email, "Creating user");

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::email.eq(email.value()),
            users::name.eq(name),
            users::password_hash.eq(&password_hash),
            users::is_staff.eq(i32::from(is_staff)),
            users::is_superuser.eq(i32::from(is_superuser)),
        ))
        .execute(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => PersistenceError::DuplicateEmail(email.value().to_string()),
            other => PersistenceError::from(other),
        })?;

    let user_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}

/// Updates a user's display name.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
/// * `name` - The new display name
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_name(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    debug!(user_id, "Updating user name");

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::name.eq(name))
        .execute(conn)?;

    Ok(())
}

/// Updates a user's password.
///
/// The new password is hashed with bcrypt before storage.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
/// * `new_password` - The new password (will be hashed)
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    debug!(user_id, "Updating user password");

    // Hash the new password using bcrypt
    let password_hash: String = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::password_hash.eq(&password_hash))
        .execute(conn)?;

    Ok(())
}

/// Updates the last login timestamp for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), PersistenceError> {
    debug!(user_id, "Updating last_login_at");

    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}
