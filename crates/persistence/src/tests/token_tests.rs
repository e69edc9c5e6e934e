// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for authentication token persistence.

use crate::{Persistence, TokenData};
use larder_domain::Email;

fn create_test_persistence_with_user() -> (Persistence, i64) {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let email = Email::parse("test@example.com").unwrap();
    let user_id = persistence
        .create_user(&email, "Test User", "testpass123")
        .unwrap();
    (persistence, user_id)
}

#[test]
fn test_create_and_fetch_token() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    let token_id = persistence
        .create_token("token_abc123", user_id, "2099-12-31T23:59:59Z")
        .unwrap();
    assert!(token_id > 0);

    let token: TokenData = persistence.get_token("token_abc123").unwrap().unwrap();
    assert_eq!(token.user_id, user_id);
    assert_eq!(token.expires_at, "2099-12-31T23:59:59Z");
}

#[test]
fn test_get_unknown_token_returns_none() {
    let (mut persistence, _user_id) = create_test_persistence_with_user();

    assert!(persistence.get_token("no_such_token").unwrap().is_none());
}

#[test]
fn test_delete_token() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    persistence
        .create_token("token_abc123", user_id, "2099-12-31T23:59:59Z")
        .unwrap();
    persistence.delete_token("token_abc123").unwrap();

    assert!(persistence.get_token("token_abc123").unwrap().is_none());
}

#[test]
fn test_delete_tokens_for_user() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    persistence
        .create_token("token_one", user_id, "2099-12-31T23:59:59Z")
        .unwrap();
    persistence
        .create_token("token_two", user_id, "2099-12-31T23:59:59Z")
        .unwrap();
    assert_eq!(persistence.count_tokens_for_user(user_id).unwrap(), 2);

    let deleted = persistence.delete_tokens_for_user(user_id).unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(persistence.count_tokens_for_user(user_id).unwrap(), 0);
}

#[test]
fn test_delete_expired_tokens_removes_only_expired() {
    let (mut persistence, user_id) = create_test_persistence_with_user();

    persistence
        .create_token("expired_token", user_id, "2000-01-01T00:00:00.000000000Z")
        .unwrap();
    persistence
        .create_token("live_token", user_id, "2099-12-31T23:59:59.000000000Z")
        .unwrap();

    let deleted = persistence.delete_expired_tokens().unwrap();

    assert_eq!(deleted, 1);
    assert!(persistence.get_token("expired_token").unwrap().is_none());
    assert!(persistence.get_token("live_token").unwrap().is_some());
}

#[test]
fn test_token_requires_existing_user() {
    let (mut persistence, _user_id) = create_test_persistence_with_user();

    // Foreign key enforcement rejects tokens for unknown users
    let result = persistence.create_token("orphan_token", 9999, "2099-12-31T23:59:59Z");

    assert!(result.is_err());
}
