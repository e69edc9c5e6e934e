// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation functions for the persistence layer.
//!
//! All mutations take an explicit `SqliteConnection` and are wrapped by
//! the `Persistence` adapter in `lib.rs`.

mod recipes;
mod tokens;
mod users;

pub use recipes::create_recipe;
pub use tokens::{create_token, delete_expired_tokens, delete_token, delete_tokens_for_user};
pub use users::{create_user, update_last_login, update_name, update_password};
