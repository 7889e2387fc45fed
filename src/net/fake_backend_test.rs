//! In-process stand-in for the FoodBites backend, served by axum on an
//! ephemeral port. Mirrors the status codes and `{ message }` bodies of the
//! real service closely enough to exercise the client end to end.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const VALID_USER: &str = "asha";
pub const VALID_PASSWORD: &str = "secret";
pub const VALID_EMAIL: &str = "asha@example.com";

struct Account {
    password: String,
    email: Option<String>,
    created_at: String,
}

#[derive(Default)]
struct Db {
    accounts: HashMap<String, Account>,
    /// token -> username
    tokens: HashMap<String, String>,
    searches: Vec<Option<String>>,
}

type Shared = Arc<Mutex<Db>>;

#[derive(Clone)]
pub struct FakeBackend {
    pub origin: String,
    db: Shared,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        let mut db = Db::default();
        db.accounts.insert(
            VALID_USER.to_owned(),
            Account {
                password: VALID_PASSWORD.to_owned(),
                email: Some(VALID_EMAIL.to_owned()),
                created_at: "2024-01-15T10:30:00.000Z".to_owned(),
            },
        );
        let db: Shared = Arc::new(Mutex::new(db));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/foods", get(foods))
            .route("/api/users/profile", get(profile).put(update_profile).delete(delete_profile))
            .route("/api/users/profile/password", put(change_password))
            .with_state(db.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { origin: format!("http://{addr}"), db }
    }

    pub fn token_for(username: &str) -> String {
        format!("tok-{username}")
    }

    /// Invalidate every issued token, as if they all expired.
    pub fn expire_tokens(&self) {
        self.db().tokens.clear();
    }

    pub fn has_account(&self, username: &str) -> bool {
        self.db().accounts.contains_key(username)
    }

    pub fn password_of(&self, username: &str) -> Option<String> {
        self.db().accounts.get(username).map(|a| a.password.clone())
    }

    /// `search` query values received by `GET /api/foods`, in order.
    pub fn searches(&self) -> Vec<Option<String>> {
        self.db().searches.clone()
    }

    fn db(&self) -> MutexGuard<'_, Db> {
        self.db.lock().unwrap()
    }
}

/// An origin nothing is listening on.
pub async fn dead_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or("")
}

fn authenticate(db: &Db, headers: &HeaderMap) -> Result<String, Response> {
    let Some(raw) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return Err(message(StatusCode::UNAUTHORIZED, "No token, authorization denied"));
    };
    let token = raw.strip_prefix("Bearer ").unwrap_or("");
    db.tokens
        .get(token)
        .cloned()
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Token is not valid"))
}

async fn login(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let (username, password) = (field(&body, "username"), field(&body, "password"));
    if username.is_empty() || password.is_empty() {
        return message(StatusCode::BAD_REQUEST, "Username and password are required");
    }
    let mut db = db.lock().unwrap();
    let valid = db.accounts.get(username).is_some_and(|a| a.password == password);
    if !valid {
        return message(StatusCode::BAD_REQUEST, "Invalid credentials");
    }
    let token = FakeBackend::token_for(username);
    db.tokens.insert(token.clone(), username.to_owned());
    Json(json!({ "token": token })).into_response()
}

async fn register(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    let (username, password) = (field(&body, "username"), field(&body, "password"));
    if username.is_empty() || password.is_empty() {
        return message(StatusCode::BAD_REQUEST, "Username and password are required");
    }
    let mut db = db.lock().unwrap();
    if db.accounts.contains_key(username) {
        return message(StatusCode::BAD_REQUEST, "User already exists");
    }
    db.accounts.insert(
        username.to_owned(),
        Account { password: password.to_owned(), email: None, created_at: "2025-03-01T08:00:00Z".to_owned() },
    );
    message(StatusCode::CREATED, "User registered successfully")
}

async fn foods(State(db): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Response {
    let search = params.get("search").cloned();
    db.lock().unwrap().searches.push(search.clone());

    match search.as_deref() {
        Some("boom") => return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response(),
        Some("garbled") => return Json(json!({ "not": "a list" })).into_response(),
        Some("slow") => tokio::time::sleep(Duration::from_secs(2)).await,
        _ => {}
    }

    let menu = json!([
        { "_id": "f1", "name": "Margherita Pizza", "price": 299, "description": "Classic", "category": "Pizza", "image": "/uploads/pizza.png" },
        { "_id": "f2", "name": "Veg Burger", "price": 149.5, "category": "Burger", "image": null },
        { "_id": "f3", "name": "Masala Dosa", "price": 120, "description": "Crispy", "category": "Breakfast" }
    ]);
    let term = search.unwrap_or_default().to_lowercase();
    let filtered: Vec<Value> = menu
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| {
            term.is_empty()
                || field(f, "name").to_lowercase().contains(&term)
                || field(f, "category").to_lowercase().contains(&term)
        })
        .cloned()
        .collect();
    Json(Value::Array(filtered)).into_response()
}

async fn profile(State(db): State<Shared>, headers: HeaderMap) -> Response {
    let db = db.lock().unwrap();
    let username = match authenticate(&db, &headers) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let Some(account) = db.accounts.get(&username) else {
        return message(StatusCode::NOT_FOUND, "User not found");
    };
    Json(json!({ "username": username, "email": account.email, "createdAt": account.created_at })).into_response()
}

async fn update_profile(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut db = db.lock().unwrap();
    let current = match authenticate(&db, &headers) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let (username, email) = (field(&body, "username").to_owned(), field(&body, "email").to_owned());
    if username.is_empty() {
        return message(StatusCode::BAD_REQUEST, "Username is required");
    }
    if username != current && db.accounts.contains_key(&username) {
        return message(StatusCode::BAD_REQUEST, "Username already taken");
    }
    let Some(mut account) = db.accounts.remove(&current) else {
        return message(StatusCode::NOT_FOUND, "User not found");
    };
    account.email = Some(email);
    db.accounts.insert(username.clone(), account);
    for owner in db.tokens.values_mut() {
        if *owner == current {
            owner.clone_from(&username);
        }
    }
    message(StatusCode::OK, "Profile updated successfully")
}

async fn change_password(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut db = db.lock().unwrap();
    let current = match authenticate(&db, &headers) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    let Some(account) = db.accounts.get_mut(&current) else {
        return message(StatusCode::NOT_FOUND, "User not found");
    };
    if account.password != field(&body, "oldPassword") {
        return message(StatusCode::BAD_REQUEST, "Old password is incorrect");
    }
    account.password = field(&body, "newPassword").to_owned();
    message(StatusCode::OK, "Password updated successfully")
}

async fn delete_profile(State(db): State<Shared>, headers: HeaderMap) -> Response {
    let mut db = db.lock().unwrap();
    let current = match authenticate(&db, &headers) {
        Ok(u) => u,
        Err(resp) => return resp,
    };
    db.accounts.remove(&current);
    db.tokens.retain(|_, owner| *owner != current);
    message(StatusCode::OK, "Account deleted successfully")
}
