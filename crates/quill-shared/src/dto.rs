//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to join the newsletter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Outcome of a subscribe request. Repeat subscriptions are not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub subscribed: bool,
    pub already_subscribed: bool,
}

/// Request to open an admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Text to run through the writing assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistRequest {
    pub content: String,
}

/// Writing assistant result. `assisted` is false when `text` is the unchanged input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistResponse {
    pub text: String,
    pub assisted: bool,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Query string of `DELETE /api/admin/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteAllParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// One entry of the category filter list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Value for the `category` query parameter.
    pub value: String,
    pub label: String,
}
