//! Signed-in state: the bearer token and the user's profile.
//!
//! [`SessionContext`] is created once at startup from the persisted store
//! and handed explicitly to whatever needs it. Every sign-in, sign-up and
//! sign-out writes the new state back before it becomes visible.

use crate::{
    api::{
        auth::{self, AuthResponse, LoginRequest, RegisterRequest},
        ApiClient,
    },
    error::Result,
    models::UserProfile,
    services::storage::KeyValueStore,
};

pub const STORAGE_TOKEN_KEY: &str = "auth.token";
pub const STORAGE_USER_KEY: &str = "auth.user";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Opaque bearer token; empty when signed out.
    pub token: String,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(&self) -> Option<&str> {
        Some(self.token.as_str()).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }

    fn from_auth(response: &AuthResponse) -> Self {
        Self {
            token: response.token().to_string(),
            user: Some(response.profile()),
        }
    }
}

pub struct SessionContext {
    store: KeyValueStore,
    session: Session,
}

impl SessionContext {
    /// Load the persisted session. An unreadable profile is dropped.
    pub async fn init(store: KeyValueStore) -> Result<Self> {
        store.init().await?;

        let token = store.get(STORAGE_TOKEN_KEY).await?.unwrap_or_default();
        let user = match store.get(STORAGE_USER_KEY).await? {
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable stored profile");
                    None
                }
            },
            None => None,
        };

        tracing::debug!(authenticated = !token.is_empty(), "Session loaded");

        Ok(Self {
            store,
            session: Session { token, user },
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn sign_in(
        &mut self,
        client: &ApiClient,
        credentials: &LoginRequest,
    ) -> Result<AuthResponse> {
        let response = auth::login(client, &self.session, credentials).await?;
        self.replace(Session::from_auth(&response)).await?;
        tracing::info!(login = %credentials.login, "Signed in");
        Ok(response)
    }

    pub async fn sign_up(
        &mut self,
        client: &ApiClient,
        registration: &RegisterRequest,
    ) -> Result<AuthResponse> {
        let response = auth::register(client, &self.session, registration).await?;
        self.replace(Session::from_auth(&response)).await?;
        tracing::info!(login = %registration.login, "Registered");
        Ok(response)
    }

    pub async fn sign_out(&mut self) -> Result<()> {
        self.replace(Session::anonymous()).await?;
        tracing::info!("Signed out");
        Ok(())
    }

    async fn replace(&mut self, next: Session) -> Result<()> {
        if next.token.is_empty() {
            self.store.remove(STORAGE_TOKEN_KEY).await?;
        } else {
            self.store.set(STORAGE_TOKEN_KEY, &next.token).await?;
        }

        match &next.user {
            Some(user) => {
                let raw = serde_json::to_string(user)?;
                self.store.set(STORAGE_USER_KEY, &raw).await?;
            }
            None => self.store.remove(STORAGE_USER_KEY).await?,
        }

        self.session = next;
        Ok(())
    }
}
