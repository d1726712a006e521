use serde::{Deserialize, Serialize};

use crate::auth::services::ProfileChanges;

/// Request body for signup. Missing fields decode as empty and fail validation.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for reset and update: the token plus optional overrides.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<String>,
}

impl ProfileRequest {
    pub fn changes(&self) -> ProfileChanges {
        ProfileChanges {
            password: self.password.clone(),
            first_name: self.firstname.clone(),
            last_name: self.lastname.clone(),
            location: self.location.clone(),
            phone: self.phone.clone(),
            preferences: self.preferences.clone(),
        }
    }
}

/// Request body for a forgotten password.
#[derive(Debug, Deserialize)]
pub struct ForgotRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: i64,
    pub token: String,
}

/// Echoes the token that was just consumed.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub id: i64,
    pub token: String,
}
