// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// A stored user row.
///
/// This struct deliberately does NOT derive `Serialize`: the password hash
/// must never cross the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A stored authentication token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token_id: i64,
    pub token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// A stored recipe row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeData {
    pub recipe_id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
}
