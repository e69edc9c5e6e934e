// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use larder_persistence::Persistence;

use crate::{CreateUserRequest, CreateUserResponse, LoginRequest, create_user};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn normal_payload() -> CreateUserRequest {
    CreateUserRequest {
        email: String::from("test@example.com"),
        password: String::from("testpass123"),
        name: String::from("Test Name"),
    }
}

pub fn short_password_payload() -> CreateUserRequest {
    CreateUserRequest {
        email: String::from("test@example.com"),
        password: String::from("test"),
        name: String::from("Test Name"),
    }
}

pub fn normal_login() -> LoginRequest {
    LoginRequest {
        email: String::from("test@example.com"),
        password: String::from("testpass123"),
    }
}

/// Creates the standard test user and returns its response.
pub fn create_normal_user(persistence: &mut Persistence) -> CreateUserResponse {
    create_user(persistence, normal_payload()).expect("Failed to create test user")
}
