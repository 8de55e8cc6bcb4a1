use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiClient, ApiRequest},
    error::Result,
    models::UserProfile,
    services::session::Session,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl AuthResponse {
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or("")
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            login: self.login.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

pub async fn login(
    client: &ApiClient,
    session: &Session,
    body: &LoginRequest,
) -> Result<AuthResponse> {
    let request = ApiRequest::post("/auth/login").json(body)?;
    client.fetch(session, request).await
}

pub async fn register(
    client: &ApiClient,
    session: &Session,
    body: &RegisterRequest,
) -> Result<AuthResponse> {
    let request = ApiRequest::post("/auth/register").json(body)?;
    client.fetch(session, request).await
}
