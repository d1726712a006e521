use serde::{Deserialize, Serialize};

use crate::messages::repo_types::Message;

/// Request body for posting a message.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ReadRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub page: i64,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub message_id: i64,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ReadResponse {
    pub messages: Vec<Message>,
}
