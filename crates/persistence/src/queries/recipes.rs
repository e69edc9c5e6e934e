// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recipe queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::data_models::RecipeData;
use crate::diesel_schema::recipes;
use crate::error::PersistenceError;

/// Diesel Queryable struct for recipe rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = recipes)]
struct RecipeRow {
    recipe_id: i64,
    user_id: i64,
    title: String,
    time_minutes: i32,
    price: String,
    description: String,
}

impl TryFrom<RecipeRow> for RecipeData {
    type Error = PersistenceError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let price: Decimal = Decimal::from_str(&row.price).map_err(|e| {
            PersistenceError::SerializationError(format!(
                "Invalid stored price '{}': {e}",
                row.price
            ))
        })?;

        Ok(Self {
            recipe_id: row.recipe_id,
            user_id: row.user_id,
            title: row.title,
            time_minutes: row.time_minutes,
            price,
            description: row.description,
        })
    }
}

/// Retrieves a recipe by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `recipe_id` - The recipe ID
///
/// # Errors
///
/// Returns an error if the database query fails or the stored price
/// cannot be parsed.
/// Returns `Ok(None)` if the recipe is not found.
pub fn get_recipe(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> Result<Option<RecipeData>, PersistenceError> {
    debug!(recipe_id, "Looking up recipe");

    let result: Result<RecipeRow, diesel::result::Error> = recipes::table
        .filter(recipes::recipe_id.eq(recipe_id))
        .select(RecipeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(RecipeData::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all recipes owned by a user, ordered by their database ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The owning user's ID
///
/// # Errors
///
/// Returns an error if the database query fails or a stored price
/// cannot be parsed.
pub fn list_recipes_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<RecipeData>, PersistenceError> {
    let rows: Vec<RecipeRow> = recipes::table
        .filter(recipes::user_id.eq(user_id))
        .order(recipes::recipe_id.asc())
        .select(RecipeRow::as_select())
        .load(conn)?;

    rows.into_iter().map(RecipeData::try_from).collect()
}
