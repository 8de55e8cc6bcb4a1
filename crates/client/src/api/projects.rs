use serde::Deserialize;

use crate::{
    api::{ApiClient, ApiRequest},
    error::{AppError, Result},
    models::{Page, ProjectRecord, ProjectTemplate},
    services::session::Session,
};

/// `GET /projects` answers either with a bare list or a page envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    List(Vec<ProjectRecord>),
    Page(Page<ProjectRecord>),
}

impl CatalogResponse {
    fn into_records(self) -> Vec<ProjectRecord> {
        match self {
            CatalogResponse::List(records) => records,
            CatalogResponse::Page(page) => page.content,
        }
    }
}

/// Fetch the catalog. `params` are passed through as the query string.
pub async fn list_projects(
    client: &ApiClient,
    session: &Session,
    params: &[(String, String)],
) -> Result<Vec<ProjectRecord>> {
    let request = ApiRequest::get("/projects").params(params.iter().cloned());
    let response: CatalogResponse = client.fetch(session, request).await?;
    let records = response.into_records();
    tracing::debug!(count = records.len(), "Catalog loaded");
    Ok(records)
}

pub async fn get_project(client: &ApiClient, session: &Session, id: i64) -> Result<ProjectTemplate> {
    let request = ApiRequest::get(format!("/projects/{id}"));
    match client.fetch(session, request).await {
        Err(AppError::Api(err)) if err.is_not_found() => {
            Err(AppError::NotFound(format!("Project {id} not found")))
        }
        other => other,
    }
}
