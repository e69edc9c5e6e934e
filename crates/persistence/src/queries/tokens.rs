// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication token queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::TokenData;
use crate::diesel_schema::auth_tokens;
use crate::error::PersistenceError;

/// Diesel Queryable struct for token rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = auth_tokens)]
struct TokenRow {
    token_id: i64,
    token: String,
    user_id: i64,
    created_at: String,
    expires_at: String,
}

impl From<TokenRow> for TokenData {
    fn from(row: TokenRow) -> Self {
        Self {
            token_id: row.token_id,
            token: row.token,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// Retrieves a token by its value.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `token` - The token value
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the token is not found.
pub fn get_token_by_value(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<TokenData>, PersistenceError> {
    debug!("Looking up auth token");

    let result: Result<TokenRow, diesel::result::Error> = auth_tokens::table
        .filter(auth_tokens::token.eq(token))
        .select(TokenRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(TokenData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts the tokens belonging to a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tokens_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(auth_tokens::table
        .filter(auth_tokens::user_id.eq(user_id))
        .count()
        .get_result(conn)?)
}
