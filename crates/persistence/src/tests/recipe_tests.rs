// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for recipe persistence.

use crate::{Persistence, RecipeData};
use larder_domain::{Email, Recipe};
use rust_decimal::Decimal;
use std::str::FromStr;

fn create_test_persistence_with_user() -> (Persistence, i64) {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let email = Email::parse("test@example.com").unwrap();
    let user_id = persistence
        .create_user(&email, "Test User", "testpass123")
        .unwrap();
    (persistence, user_id)
}

fn create_test_recipe(user_id: i64) -> Recipe {
    Recipe::new(
        user_id,
        String::from("Sample recipe"),
        5,
        Decimal::from_str("5.50").unwrap(),
        String::from("Sample recipe description"),
    )
}

#[test]
fn test_create_and_fetch_recipe() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    let recipe_id = persistence.create_recipe(&create_test_recipe(user_id)).unwrap();
    assert!(recipe_id > 0);

    let stored: RecipeData = persistence.get_recipe(recipe_id).unwrap().unwrap();

    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.title, "Sample recipe");
    assert_eq!(stored.time_minutes, 5);
    assert_eq!(stored.price, Decimal::from_str("5.50").unwrap());
    assert_eq!(stored.description, "Sample recipe description");
}

#[test]
fn test_recipe_price_round_trips_as_fixed_point() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    let mut recipe = create_test_recipe(user_id);
    recipe.price = Decimal::from_str("19.99").unwrap();

    let recipe_id = persistence.create_recipe(&recipe).unwrap();
    let stored = persistence.get_recipe(recipe_id).unwrap().unwrap();

    assert_eq!(stored.price, Decimal::new(1999, 2));
}

#[test]
fn test_get_unknown_recipe_returns_none() {
    let (mut persistence, _user_id) = create_test_persistence_with_user();

    assert!(persistence.get_recipe(42).unwrap().is_none());
}

#[test]
fn test_list_recipes_for_user_ordered_by_id() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    let mut first = create_test_recipe(user_id);
    first.title = String::from("First");
    let mut second = create_test_recipe(user_id);
    second.title = String::from("Second");

    persistence.create_recipe(&first).unwrap();
    persistence.create_recipe(&second).unwrap();

    let recipes = persistence.list_recipes_for_user(user_id).unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].title, "First");
    assert_eq!(recipes[1].title, "Second");
}

#[test]
fn test_list_recipes_excludes_other_users() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    let other_email = Email::parse("other@example.com").unwrap();
    let other_id = persistence
        .create_user(&other_email, "Other User", "otherpass123")
        .unwrap();

    persistence.create_recipe(&create_test_recipe(user_id)).unwrap();
    persistence.create_recipe(&create_test_recipe(other_id)).unwrap();

    let recipes = persistence.list_recipes_for_user(user_id).unwrap();

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].user_id, user_id);
}

#[test]
fn test_recipe_requires_existing_user() {
    let (mut persistence, _user_id) = create_test_persistence_with_user();

    // Foreign key enforcement rejects recipes for unknown users
    let result = persistence.create_recipe(&create_test_recipe(9999));

    assert!(result.is_err());
}
