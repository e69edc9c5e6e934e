// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recipe mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use larder_domain::Recipe;
use tracing::info;

use crate::diesel_schema::recipes;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new recipe owned by an existing user.
///
/// The price is stored as its canonical decimal string representation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `recipe` - The recipe to persist
///
/// # Errors
///
/// Returns an error if the owning user does not exist (foreign key
/// violation) or the insert fails.
pub fn create_recipe(
    conn: &mut SqliteConnection,
    recipe: &Recipe,
) -> Result<i64, PersistenceError> {
    info!(user_id = recipe.user_id, title = %recipe.title, "Creating recipe");

    diesel::insert_into(recipes::table)
        .values((
            recipes::user_id.eq(recipe.user_id),
            recipes::title.eq(&recipe.title),
            recipes::time_minutes.eq(recipe.time_minutes),
            recipes::price.eq(recipe.price.to_string()),
            recipes::description.eq(&recipe.description),
        ))
        .execute(conn)?;

    let recipe_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(recipe_id, "Recipe created successfully");

    Ok(recipe_id)
}
