// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication token mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::debug;

use crate::diesel_schema::auth_tokens;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new authentication token for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The unique token value
/// * `user_id` - The owning user's ID
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the token cannot be created.
pub fn create_token(
    conn: &mut SqliteConnection,
    token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(user_id, "Creating auth token");

    diesel::insert_into(auth_tokens::table)
        .values((
            auth_tokens::token.eq(token),
            auth_tokens::user_id.eq(user_id),
            auth_tokens::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let token_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    Ok(token_id)
}

/// Deletes a token by value.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The token value to delete
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_token(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting auth token");

    diesel::delete(auth_tokens::table)
        .filter(auth_tokens::token.eq(token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all tokens for a specific user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID whose tokens should be deleted
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_tokens_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    debug!(user_id, "Deleting all auth tokens for user");

    let deleted: usize = diesel::delete(auth_tokens::table)
        .filter(auth_tokens::user_id.eq(user_id))
        .execute(conn)?;

    Ok(deleted)
}

/// Deletes all expired tokens.
///
/// Expiration timestamps are stored in ISO 8601 format, which compares
/// lexicographically in chronological order.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_tokens(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let now: String = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))?;

    let deleted: usize = diesel::delete(auth_tokens::table)
        .filter(auth_tokens::expires_at.lt(&now))
        .execute(conn)?;

    debug!(deleted, "Purged expired auth tokens");

    Ok(deleted)
}
