//! In-process stand-in for the ordering REST API.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct MockState {
    pub orders: Vec<Value>,
    pub reject_orders: bool,
    pub fail_listing: bool,
    pub last_order_body: Option<Value>,
    pub last_list_query: Vec<(String, String)>,
    pub list_requests: usize,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub base_url: String,
    pub state: Shared,
}

impl MockApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            orders: vec![order_json(2, "IN_REVIEW"), order_json(1, "SUBMITTED")],
            ..MockState::default()
        }));

        let protected = Router::new()
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/:id", get(get_order))
            .route_layer(middleware::from_fn(require_bearer));

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/projects", get(list_projects))
            .route("/projects/:id", get(get_project))
            .route("/echo", get(echo).post(echo))
            .route("/empty", get(empty))
            .route("/text", get(text))
            .route("/fail/json", get(fail_json))
            .route("/fail/text", get(fail_text))
            .route("/fail/bare", get(fail_bare))
            .merge(protected)
            .with_state(state.clone());

        let app = Router::new().nest("/api", api);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind mock api");
        let addr = listener.local_addr().expect("mock api address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock api server");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    pub fn orders_snapshot(&self) -> Vec<Value> {
        self.state.lock().unwrap().orders.clone()
    }
}

pub fn order_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "projectTemplateId": 3,
        "projectTemplateName": "Дом 120",
        "address": "Красногорск, ул. Ленина, 15",
        "requestedTimeline": "6-8 месяцев",
        "phone": "+7-999-123-45-67",
        "email": "ivan@example.com",
        "submittedAt": "2024-02-01T10:00:00Z"
    })
}

pub fn catalog_json() -> Value {
    json!([
        {"id": 1, "name": "Дом 80", "image": "https://img/1.jpg", "floors": 1, "material": "Кирпич",
         "area": 80, "rooms": 3, "bedrooms": 2, "bathrooms": 1, "price": 7_500_000},
        {"id": 2, "name": "Дом 850", "image": "https://img/2.jpg", "floors": 3, "material": "Монолит",
         "area": 850, "rooms": 8, "bedrooms": 6, "bathrooms": 3, "price": 16_000_000}
    ])
}

async fn require_bearer(request: Request, next: Next) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(t) if t == TOKEN => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["login"] == "ivan" && body["password"] == "secret" {
        Json(json!({
            "token": TOKEN,
            "id": 42,
            "login": "ivan",
            "fullName": "Иван Иванов",
            "role": "CUSTOMER",
            "email": "ivan@example.com"
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Неверный логин или пароль"})),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["login"] == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"detail": "Логин уже занят"})),
        )
            .into_response();
    }
    Json(json!({
        "token": TOKEN,
        "login": body["login"],
        "fullName": body["fullName"],
        "role": body["role"],
        "email": body["email"],
        "phone": body["phone"]
    }))
    .into_response()
}

async fn list_orders(
    State(state): State<Shared>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.list_requests += 1;
    state.last_list_query = query.clone();
    if state.fail_listing {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    }

    let param = |name: &str| {
        query
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.parse::<usize>().ok())
    };
    let page = param("page").unwrap_or(0);
    let size = param("size").unwrap_or(9).max(1);
    let content: Vec<Value> = state
        .orders
        .iter()
        .skip(page * size)
        .take(size)
        .cloned()
        .collect();

    Json(json!({
        "content": content,
        "currentPage": page,
        "totalElements": state.orders.len()
    }))
    .into_response()
}

async fn create_order(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.last_order_body = Some(body.clone());
    if state.reject_orders {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "Проект недоступен для заказа"})),
        )
            .into_response();
    }

    let id = state.orders.len() as i64 + 1;
    let mut order = order_json(id, "SUBMITTED");
    order["address"] = body["address"].clone();
    order["projectTemplateId"] = body["projectTemplateId"].clone();
    state.orders.push(order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn get_order(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.orders.iter().find(|o| o["id"] == id) {
        Some(order) => Json(order.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Order {id} not found")})),
        )
            .into_response(),
    }
}

async fn list_projects() -> Json<Value> {
    Json(catalog_json())
}

async fn get_project(Path(id): Path<i64>) -> Response {
    if id != 3 {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": 3,
        "name": "Дом 120",
        "description": "Двухэтажный дом из бруса",
        "totalArea": 120.5,
        "floors": 2,
        "mainMaterials": "Клееный брус",
        "basePrice": 9_800_000,
        "media": [{"url": "https://img/3.jpg"}]
    }))
    .into_response()
}

/// Reflects the request line, headers and body back as JSON.
async fn echo(
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Json<Value> {
    let value_of = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "accept": value_of(header::ACCEPT),
        "authorization": value_of(header::AUTHORIZATION),
        "contentType": value_of(header::CONTENT_TYPE),
        "query": query,
        "body": body,
    }))
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn text() -> &'static str {
    "plain pong"
}

async fn fail_json() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Некорректный запрос", "error": "Bad Request"})),
    )
        .into_response()
}

async fn fail_text() -> Response {
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

async fn fail_bare() -> StatusCode {
    StatusCode::FORBIDDEN
}
