// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Larder recipe backend.
//!
//! This crate provides database persistence for users, authentication
//! tokens, and recipes. It is built on Diesel over `SQLite`.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - In-memory databases for unit and integration tests
//! - File-based databases (with WAL) for everything else
//!
//! `SQLite` support is always available and requires no external
//! infrastructure. Schema changes ship as embedded Diesel migrations and
//! run automatically at connection time.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against in-memory databases
//! - Each test receives its own isolated database instance
//! - Tests fail fast if foreign key enforcement is not active

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use larder_domain::{Email, Recipe};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{RecipeData, TokenData, UserData};
pub use error::PersistenceError;

/// Persistence adapter for users, authentication tokens, and recipes.
///
/// Wraps a single `SQLite` connection. All reads and writes go through
/// this adapter; callers never touch Diesel directly.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated. Use atomic counter instead of timestamp to eliminate
        // race conditions.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        // Verify foreign key enforcement is active
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        sqlite::enable_wal_mode(&mut conn)?;

        // Verify foreign key enforcement is active
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a new user with no privilege flags.
    ///
    /// The password is hashed with bcrypt before storage.
    ///
    /// # Arguments
    ///
    /// * `email` - The user's validated email address
    /// * `name` - The user's display name
    /// * `password` - The plain-text password (will be hashed)
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is taken,
    /// or another error if the insert fails.
    pub fn create_user(
        &mut self,
        email: &Email,
        name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_user(&mut self.conn, email, name, password, false, false)
    }

    /// Creates a new superuser.
    ///
    /// Superusers carry both `is_staff` and `is_superuser`.
    ///
    /// # Arguments
    ///
    /// * `email` - The user's validated email address
    /// * `name` - The user's display name
    /// * `password` - The plain-text password (will be hashed)
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is taken,
    /// or another error if the insert fails.
    pub fn create_superuser(
        &mut self,
        email: &Email,
        name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_user(&mut self.conn, email, name, password, true, true)
    }

    /// Retrieves a user by email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &Email,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Checks whether a user with the given email exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn email_exists(&mut self, email: &Email) -> Result<bool, PersistenceError> {
        queries::users::email_exists(&mut self.conn, email)
    }

    /// Lists all users ordered by their database ID (insertion order).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Counts the total number of users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain text password to verify
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    /// Updates a user's display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_name(&mut self, user_id: i64, name: &str) -> Result<(), PersistenceError> {
        mutations::update_name(&mut self.conn, user_id, name)
    }

    /// Updates a user's password.
    ///
    /// The new password is hashed with bcrypt before storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_password(
        &mut self,
        user_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::update_password(&mut self.conn, user_id, new_password)
    }

    /// Updates the last login timestamp for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::update_last_login(&mut self.conn, user_id)
    }

    // ========================================================================
    // Authentication Tokens
    // ========================================================================

    /// Creates a new authentication token for a user.
    ///
    /// # Arguments
    ///
    /// * `token` - The unique token value
    /// * `user_id` - The owning user's ID
    /// * `expires_at` - The expiration timestamp (ISO 8601 format)
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be created.
    pub fn create_token(
        &mut self,
        token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_token(&mut self.conn, token, user_id, expires_at)
    }

    /// Retrieves a token by its value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_token(&mut self, token: &str) -> Result<Option<TokenData>, PersistenceError> {
        queries::tokens::get_token_by_value(&mut self.conn, token)
    }

    /// Deletes a token by value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_token(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::delete_token(&mut self.conn, token)
    }

    /// Deletes all tokens for a specific user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_tokens_for_user(&mut self, user_id: i64) -> Result<usize, PersistenceError> {
        mutations::delete_tokens_for_user(&mut self.conn, user_id)
    }

    /// Deletes all expired tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_tokens(&mut self) -> Result<usize, PersistenceError> {
        mutations::delete_expired_tokens(&mut self.conn)
    }

    /// Counts the tokens belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_tokens_for_user(&mut self, user_id: i64) -> Result<i64, PersistenceError> {
        queries::tokens::count_tokens_for_user(&mut self.conn, user_id)
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    /// Creates a new recipe owned by an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning user does not exist or the insert
    /// fails.
    pub fn create_recipe(&mut self, recipe: &Recipe) -> Result<i64, PersistenceError> {
        mutations::create_recipe(&mut self.conn, recipe)
    }

    /// Retrieves a recipe by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_recipe(&mut self, recipe_id: i64) -> Result<Option<RecipeData>, PersistenceError> {
        queries::recipes::get_recipe(&mut self.conn, recipe_id)
    }

    /// Lists all recipes owned by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_recipes_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<RecipeData>, PersistenceError> {
        queries::recipes::list_recipes_for_user(&mut self.conn, user_id)
    }
}
