use crate::{
    api::{ApiClient, ApiRequest},
    error::{AppError, Result},
    models::{NewOrder, Order, Page},
    services::session::Session,
};

pub async fn create_order(client: &ApiClient, session: &Session, order: &NewOrder) -> Result<Order> {
    let request = ApiRequest::post("/orders").json(order)?;
    let created: Order = client.fetch(session, request).await?;
    tracing::info!(order_id = created.id, "Order submitted");
    Ok(created)
}

/// One page of the caller's orders. `page` is 0-based, as the API expects.
pub async fn list_orders(
    client: &ApiClient,
    session: &Session,
    page: u32,
    size: u32,
) -> Result<Page<Order>> {
    let request = ApiRequest::get("/orders")
        .param("page", page)
        .param("size", size);
    client.fetch(session, request).await
}

pub async fn get_order(client: &ApiClient, session: &Session, id: i64) -> Result<Order> {
    let request = ApiRequest::get(format!("/orders/{id}"));
    match client.fetch(session, request).await {
        Err(AppError::Api(err)) if err.is_not_found() => {
            Err(AppError::NotFound(format!("Order {id} not found")))
        }
        other => other,
    }
}
