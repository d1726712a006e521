use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::StoreError;

/// Account gate. Blocked accounts cannot authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Blocked,
    Active,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Blocked => "blocked",
            UserStatus::Active => "active",
        }
    }
}

impl FromStr for UserStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocked" => Ok(UserStatus::Blocked),
            "active" => Ok(UserStatus::Active),
            other => Err(StoreError::Corrupt(format!("unknown user status {other:?}"))),
        }
    }
}

/// User identity, credential and profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String, // empty until a password is set
    pub status: UserStatus,
    pub location: String,
    pub phone: String,
    pub preferences: String,
    pub one_time_token: Option<String>, // set while a confirmation is pending
}

/// Raw `users` row; nullable columns decode as `None`.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password: Option<String>,
    pub status: String,
    pub one_time_token: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.user_id,
            email: r.email,
            first_name: r.firstname,
            last_name: r.lastname,
            password_hash: r.password.unwrap_or_default(),
            status: r.status.parse()?,
            location: r.location.unwrap_or_default(),
            phone: r.phone.unwrap_or_default(),
            preferences: r.preferences.unwrap_or_default(),
            one_time_token: r.one_time_token.filter(|t| !t.is_empty()),
        })
    }
}
