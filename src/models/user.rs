use serde::{Deserialize, Serialize};

use super::lenient::deserialize_id_as_string;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id_as_string")]
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Body returned by login and register.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Body returned by token validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentUser {
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterCredentials {
    pub username: String,
    pub email: String,
    pub password: String,
}
