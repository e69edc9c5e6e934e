// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for profile retrieval, profile update, and user listing.

use crate::auth::AuthenticatedUser;
use crate::tests::helpers::{create_normal_user, create_test_persistence, normal_login};
use crate::{
    ApiError, CreateUserRequest, UpdateProfileRequest, create_user, list_users, login, profile,
    update_profile,
};

fn authenticated_actor(user_id: i64) -> AuthenticatedUser {
    AuthenticatedUser::new(user_id, String::from("test@example.com"))
}

#[test]
fn test_profile_returns_name_and_email() {
    let mut persistence = create_test_persistence();
    let created = create_normal_user(&mut persistence);

    let user = persistence.get_user_by_id(created.user_id).unwrap().unwrap();
    let response = profile(&user);

    assert_eq!(response.name, "Test Name");
    assert_eq!(response.email, "test@example.com");
}

#[test]
fn test_update_name_persists() {
    let mut persistence = create_test_persistence();
    let created = create_normal_user(&mut persistence);

    let request = UpdateProfileRequest {
        name: Some(String::from("Updated Name")),
        password: None,
    };
    let response =
        update_profile(&mut persistence, &request, &authenticated_actor(created.user_id)).unwrap();

    assert_eq!(response.name, "Updated Name");

    let user = persistence.get_user_by_id(created.user_id).unwrap().unwrap();
    assert_eq!(user.name, "Updated Name");
}

#[test]
fn test_update_password_rehashes() {
    let mut persistence = create_test_persistence();
    let created = create_normal_user(&mut persistence);

    let request = UpdateProfileRequest {
        name: None,
        password: Some(String::from("newpassword123")),
    };
    update_profile(&mut persistence, &request, &authenticated_actor(created.user_id)).unwrap();

    // The old password no longer authenticates; the new one does
    let old = login(&mut persistence, &normal_login());
    assert!(old.is_err());

    let new = login(
        &mut persistence,
        &crate::LoginRequest {
            email: String::from("test@example.com"),
            password: String::from("newpassword123"),
        },
    );
    assert!(new.is_ok());
}

#[test]
fn test_update_name_and_password_together() {
    let mut persistence = create_test_persistence();
    let created = create_normal_user(&mut persistence);

    let request = UpdateProfileRequest {
        name: Some(String::from("Updated Name")),
        password: Some(String::from("newpassword123")),
    };
    let response =
        update_profile(&mut persistence, &request, &authenticated_actor(created.user_id)).unwrap();

    assert_eq!(response.name, "Updated Name");
    assert_eq!(response.email, "test@example.com");
}

#[test]
fn test_update_with_empty_name_rejected() {
    let mut persistence = create_test_persistence();
    let created = create_normal_user(&mut persistence);

    let request = UpdateProfileRequest {
        name: Some(String::new()),
        password: None,
    };
    let result = update_profile(&mut persistence, &request, &authenticated_actor(created.user_id));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_update_with_short_password_rejected() {
    let mut persistence = create_test_persistence();
    let created = create_normal_user(&mut persistence);

    let request = UpdateProfileRequest {
        name: None,
        password: Some(String::from("short")),
    };
    let result = update_profile(&mut persistence, &request, &authenticated_actor(created.user_id));

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));

    // The old password still authenticates
    assert!(login(&mut persistence, &normal_login()).is_ok());
}

#[test]
fn test_list_users_returns_all_in_insertion_order() {
    let mut persistence = create_test_persistence();
    create_normal_user(&mut persistence);

    let second = CreateUserRequest {
        email: String::from("second@example.com"),
        password: String::from("secondpass123"),
        name: String::from("Second User"),
    };
    create_user(&mut persistence, second).unwrap();

    let response = list_users(&mut persistence).unwrap();

    assert_eq!(response.users.len(), 2);
    assert_eq!(response.users[0].email, "test@example.com");
    assert_eq!(response.users[1].email, "second@example.com");
    assert_eq!(response.users[1].name, "Second User");
}
