// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user creation through the API boundary.

use larder_domain::Email;

use crate::tests::helpers::{
    create_normal_user, create_test_persistence, normal_payload, short_password_payload,
};
use crate::{ApiError, CreateUserRequest, CreateUserResponse, create_user};

#[test]
fn test_create_user_successfully() {
    let mut persistence = create_test_persistence();

    let response: CreateUserResponse = create_user(&mut persistence, normal_payload()).unwrap();

    assert!(response.user_id > 0);
    assert_eq!(response.email, "test@example.com");
    assert_eq!(response.name, "Test Name");

    // The stored password verifies against the original plain text
    let email = Email::parse("test@example.com").unwrap();
    let user = persistence.get_user_by_email(&email).unwrap().unwrap();
    assert!(
        persistence
            .verify_password("testpass123", &user.password_hash)
            .unwrap()
    );
}

#[test]
fn test_user_with_email_exists_error() {
    let mut persistence = create_test_persistence();

    create_normal_user(&mut persistence);
    let result = create_user(&mut persistence, normal_payload());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_email"
    ));
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_password_too_short_error() {
    let mut persistence = create_test_persistence();

    let result = create_user(&mut persistence, short_password_payload());

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));

    // No user row was created
    let email = Email::parse("test@example.com").unwrap();
    assert!(!persistence.email_exists(&email).unwrap());
}

#[test]
fn test_blank_email_rejected() {
    let mut persistence = create_test_persistence();

    let request = CreateUserRequest {
        email: String::new(),
        password: String::from("testpass123"),
        name: String::from("Test Name"),
    };
    let result = create_user(&mut persistence, request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
    assert_eq!(persistence.count_users().unwrap(), 0);
}

#[test]
fn test_malformed_email_rejected() {
    let mut persistence = create_test_persistence();

    let request = CreateUserRequest {
        email: String::from("not-an-email"),
        password: String::from("testpass123"),
        name: String::from("Test Name"),
    };
    let result = create_user(&mut persistence, request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
}

#[test]
fn test_blank_name_rejected() {
    let mut persistence = create_test_persistence();

    let request = CreateUserRequest {
        email: String::from("test@example.com"),
        password: String::from("testpass123"),
        name: String::new(),
    };
    let result = create_user(&mut persistence, request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_email_domain_normalized_on_creation() {
    let mut persistence = create_test_persistence();

    let samples: [(&str, &str); 4] = [
        ("test1@EXAMPLE.com", "test1@example.com"),
        ("Test2@Example.com", "Test2@example.com"),
        ("TEST3@EXAMPLE.com", "TEST3@example.com"),
        ("test4@example.COM", "test4@example.com"),
    ];

    for (raw, expected) in samples {
        let request = CreateUserRequest {
            email: String::from(raw),
            password: String::from("samplepass123"),
            name: String::from("Test Name"),
        };
        let response = create_user(&mut persistence, request).unwrap();
        assert_eq!(response.email, expected);
    }
}
