//! Terminal commands. Each one is an action boundary: it runs to completion
//! or reports its failure, and never leaves partially updated state behind.

pub mod auth;
pub mod catalog;
pub mod orders;

use crate::{
    api::ApiClient,
    config::Config,
    error::{AppError, Result},
    services::{session::SessionContext, storage::KeyValueStore},
    views,
};

/// Everything a command needs, built once at startup.
pub struct Context {
    pub config: Config,
    pub client: ApiClient,
    pub session: SessionContext,
}

impl Context {
    pub async fn init(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config.api_base_url);
        let session = SessionContext::init(KeyValueStore::new(&config.session_dir)).await?;
        tracing::debug!(api = %client.base_url(), "Client ready");
        Ok(Self {
            config,
            client,
            session,
        })
    }
}

/// Turn a failed action into user feedback.
///
/// Field errors are listed per field; anything else becomes a one-line
/// notice with the resolved message.
pub fn report(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Validation(errors) => {
            format!("Проверьте поля формы:\n{}", views::field_errors(errors))
        }
        AppError::Api(api) => format!("{fallback}: {}", api.message),
        AppError::Unauthenticated => "Войдите в систему: stroykontrol login".to_string(),
        AppError::NotFound(message) => message.clone(),
        other => format!("{fallback}: {other}"),
    }
}
