//! Shared fixtures: an in-process fake of the store API

#![allow(dead_code)]

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Once;
use std::time::Duration;

use shop_admin::infrastructure::config::ApiConfig;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Gold & Silver Bracelet",
            "price": 695,
            "description": "From our Legends Collection.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive - USB 3.0",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }
    ])
}

fn users() -> Value {
    json!([
        {
            "address": {
                "geolocation": { "lat": "-37.3159", "long": "81.1496" },
                "city": "kilcoole",
                "street": "new road",
                "number": 7682,
                "zipcode": "12926-3874"
            },
            "id": 1,
            "email": "john@gmail.com",
            "username": "johnd",
            "password": "m38rmF$",
            "name": { "firstname": "john", "lastname": "doe" },
            "phone": "1-570-236-7033",
            "__v": 0
        },
        {
            "address": {
                "geolocation": { "lat": "-37.3159", "long": "81.1496" },
                "city": "kilcoole",
                "street": "Lovers Ln",
                "number": 7267,
                "zipcode": "12926-3874"
            },
            "id": 2,
            "email": "morrison@gmail.com",
            "username": "mor_2314",
            "password": "83r5^_",
            "name": { "firstname": "david", "lastname": "morrison" },
            "phone": "1-570-236-7033",
            "__v": 0
        }
    ])
}

fn carts() -> Value {
    json!([
        {
            "id": 1,
            "userId": 1,
            "date": "2020-03-02T00:00:00.000Z",
            "products": [{ "productId": 1, "quantity": 4 }, { "productId": 2, "quantity": 1 }],
            "__v": 0
        },
        {
            "id": 2,
            "userId": 1,
            "date": "2020-01-02T00:00:00.000Z",
            "products": [{ "productId": 2, "quantity": 4 }],
            "__v": 0
        },
        {
            "id": 3,
            "userId": 2,
            "date": "2020-03-01T00:00:00.000Z",
            "products": [{ "productId": 1, "quantity": 2 }],
            "__v": 0
        }
    ])
}

async fn product(Path(id): Path<u64>) -> impl IntoResponse {
    let found = products()
        .as_array()
        .and_then(|all| all.iter().find(|p| p["id"] == json!(id)).cloned());
    match found {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn by_category(Path(category): Path<String>) -> Json<Value> {
    let matching: Vec<Value> = products()
        .as_array()
        .map(|all| {
            all.iter()
                .filter(|p| p["category"] == json!(category))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(Value::Array(matching))
}

async fn user(Path(id): Path<u64>) -> impl IntoResponse {
    let found = users()
        .as_array()
        .and_then(|all| all.iter().find(|u| u["id"] == json!(id)).cloned());
    match found {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Routes of the fake store API, plus failure modes under their own prefixes
pub fn router() -> Router {
    let api = Router::new()
        .route("/products", get(|| async { Json(products()) }))
        .route(
            "/products/categories",
            get(|| async { Json(json!(["electronics", "jewelery", "men's clothing", "women's clothing"])) }),
        )
        .route("/products/category/:category", get(by_category))
        .route("/products/:id", get(product))
        .route("/users", get(|| async { Json(users()) }))
        .route("/users/:id", get(user))
        .route("/carts", get(|| async { Json(carts()) }));

    api.route(
        "/broken/carts",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream failure") }),
    )
    .route("/garbled/users", get(|| async { "<html>maintenance</html>" }))
    .route(
        "/slow/products",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(products())
        }),
    )
}

/// Serve the fake API on an ephemeral port and return its base URL
pub async fn spawn_api() -> String {
    ensure_init();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 10,
    }
}
