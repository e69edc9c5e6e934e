// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user persistence.

use crate::{Persistence, PersistenceError, UserData};
use larder_domain::Email;

fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

fn test_email() -> Email {
    Email::parse("test@example.com").unwrap()
}

#[test]
fn test_create_user_and_fetch_by_email() {
    let mut persistence = create_test_persistence();

    let user_id = persistence
        .create_user(&test_email(), "Test User", "testpass123")
        .unwrap();
    assert!(user_id > 0);

    let user: UserData = persistence
        .get_user_by_email(&test_email())
        .unwrap()
        .unwrap();

    assert_eq!(user.user_id, user_id);
    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.name, "Test User");
    assert!(!user.is_staff);
    assert!(!user.is_superuser);
    assert!(user.last_login_at.is_none());
}

#[test]
fn test_password_is_hashed_and_verifiable() {
    let mut persistence = create_test_persistence();

    persistence
        .create_user(&test_email(), "Test User", "testpass123")
        .unwrap();

    let user = persistence
        .get_user_by_email(&test_email())
        .unwrap()
        .unwrap();

    // The stored value is a hash, never the plain text
    assert_ne!(user.password_hash, "testpass123");
    assert!(
        persistence
            .verify_password("testpass123", &user.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("wrongpass", &user.password_hash)
            .unwrap()
    );
}

#[test]
fn test_create_user_stores_normalized_email() {
    let mut persistence = create_test_persistence();

    let email = Email::parse("Test2@Example.com").unwrap();
    persistence
        .create_user(&email, "Test User", "testpass123")
        .unwrap();

    let user = persistence.get_user_by_email(&email).unwrap().unwrap();
    assert_eq!(user.email, "Test2@example.com");

    // Lookup works regardless of how the domain was originally cased
    let lookup = Email::parse("Test2@EXAMPLE.COM").unwrap();
    assert!(persistence.get_user_by_email(&lookup).unwrap().is_some());
}

#[test]
fn test_duplicate_email_rejected() {
    let mut persistence = create_test_persistence();

    persistence
        .create_user(&test_email(), "Test User", "testpass123")
        .unwrap();

    let result = persistence.create_user(&test_email(), "Other Name", "otherpass123");

    assert!(matches!(result, Err(PersistenceError::DuplicateEmail(_))));
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_create_superuser_sets_both_flags() {
    let mut persistence = create_test_persistence();

    let user_id = persistence
        .create_superuser(&test_email(), "Admin", "adminpass123")
        .unwrap();

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert!(user.is_staff);
    assert!(user.is_superuser);
}

#[test]
fn test_get_unknown_user_returns_none() {
    let mut persistence = create_test_persistence();

    assert!(
        persistence
            .get_user_by_email(&test_email())
            .unwrap()
            .is_none()
    );
    assert!(persistence.get_user_by_id(42).unwrap().is_none());
    assert!(!persistence.email_exists(&test_email()).unwrap());
}

#[test]
fn test_update_name_persists() {
    let mut persistence = create_test_persistence();

    let user_id = persistence
        .create_user(&test_email(), "Old Name", "testpass123")
        .unwrap();

    persistence.update_name(user_id, "New Name").unwrap();

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert_eq!(user.name, "New Name");
}

#[test]
fn test_update_password_rehashes() {
    let mut persistence = create_test_persistence();

    let user_id = persistence
        .create_user(&test_email(), "Test User", "oldpass123")
        .unwrap();

    persistence.update_password(user_id, "newpass123").unwrap();

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert!(
        !persistence
            .verify_password("oldpass123", &user.password_hash)
            .unwrap()
    );
    assert!(
        persistence
            .verify_password("newpass123", &user.password_hash)
            .unwrap()
    );
}

#[test]
fn test_update_last_login_sets_timestamp() {
    let mut persistence = create_test_persistence();

    let user_id = persistence
        .create_user(&test_email(), "Test User", "testpass123")
        .unwrap();

    persistence.update_last_login(user_id).unwrap();

    let user = persistence.get_user_by_id(user_id).unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[test]
fn test_list_users_ordered_by_id() {
    let mut persistence = create_test_persistence();

    let first = Email::parse("first@example.com").unwrap();
    let second = Email::parse("second@example.com").unwrap();
    let third = Email::parse("third@example.com").unwrap();

    persistence.create_user(&first, "First", "testpass123").unwrap();
    persistence
        .create_user(&second, "Second", "testpass123")
        .unwrap();
    persistence.create_user(&third, "Third", "testpass123").unwrap();

    let users = persistence.list_users().unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].email, "first@example.com");
    assert_eq!(users[1].email, "second@example.com");
    assert_eq!(users[2].email, "third@example.com");
    assert!(users[0].user_id < users[1].user_id);
    assert!(users[1].user_id < users[2].user_id);
}
