#![allow(dead_code)]

use event_admin::{
    api::router::create_router,
    config::Config,
    infra::{factory::build_state, repositories::sqlite_document_store::SqliteDocumentStore},
    state::AppState,
};
use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

impl AuthHeaders {
    pub fn cookie(&self) -> String {
        format!("access_token={}", self.access_token)
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = Argon2::default()
            .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
            .unwrap()
            .to_string();

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            events_collection: "Events".to_string(),
            civil_timezone: chrono_tz::America::Los_Angeles,
            sales_tax_rate: 0.085,
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password_hash: password_hash,
            jwt_secret_key: include_str!("../tests/keys/test_private.pem").to_string(),
            jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            auth_issuer: "test-issuer".to_string(),
        };

        let store = Arc::new(SqliteDocumentStore::new(pool.clone()));
        let state = Arc::new(build_state(&config, store));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn login(&self) -> AuthHeaders {
        let payload = json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body = parse_body(response).await;
        let csrf_token = body["csrfToken"].as_str().expect("No csrfToken in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token,
        }
    }

    /// Sends an authenticated JSON request and returns status plus parsed body.
    pub async fn send(
        &self,
        auth: &AuthHeaders,
        method: &str,
        uri: &str,
        payload: Option<Value>,
    ) -> (axum::http::StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, auth.cookie())
            .header("X-CSRF-Token", &auth.csrf_token);

        let body = match payload {
            Some(p) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(p.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// Raw stored body for an event document.
    pub async fn stored_body(&self, id: &str) -> Value {
        let body: String = sqlx::query_scalar("SELECT body FROM documents WHERE collection = 'Events' AND id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .unwrap();
        serde_json::from_str(&body).unwrap()
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// Create-form payload for a three hour evening event in July 2026.
pub fn jazz_night_form() -> Value {
    json!({
        "name": "Jazz Night",
        "description": "<p>Live quartet</p>",
        "imageUrl": "https://img.example.com/jazz.png",
        "startDateTime": "2026-07-03T19:00",
        "endDateTime": "2026-07-03T22:00",
        "capacity": "100",
        "price": "10",
        "addSalesTax": true
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
