use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A stored user: an id plus whatever fields the client posted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// What `/echo` saw on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub const DATA_TXT: &str = "This is the text data served by the mock server.\n";
pub const DATA_XML: &str = "<?xml version=\"1.0\"?><users><user id=\"1\">Leanne Graham</user></users>";

#[derive(Clone)]
pub struct AppState {
    users: Arc<RwLock<HashMap<u64, User>>>,
    next_id: Arc<AtomicU64>,
}

impl AppState {
    fn seeded() -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from("Leanne Graham"));
        fields.insert("username".to_string(), Value::from("Bret"));
        let users = HashMap::from([(1, User { id: 1, fields })]);
        Self {
            users: Arc::new(RwLock::new(users)),
            next_id: Arc::new(AtomicU64::new(2)),
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .route("/posts/{id}", get(get_post))
        .route("/data.txt", get(data_txt))
        .route("/data.json", get(data_json))
        .route("/data.xml", get(data_xml))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/malformed", get(malformed))
        .with_state(AppState::seeded())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.users.read().await;
    let mut all: Vec<User> = users.values().cloned().collect();
    all.sort_by_key(|u| u.id);
    Json(all)
}

async fn create_user(
    State(state): State<AppState>,
    Json(mut fields): Json<Map<String, Value>>,
) -> (StatusCode, Json<User>) {
    fields.remove("id");
    let user = User {
        id: state.next_id.fetch_add(1, Ordering::Relaxed),
        fields,
    };
    state.users.write().await.insert(user.id, user.clone());
    tracing::debug!(id = user.id, "user created");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let users = state.users.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(mut fields): Json<Map<String, Value>>,
) -> Result<Json<User>, StatusCode> {
    let mut users = state.users.write().await;
    let user = users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    fields.remove("id");
    user.fields = fields;
    Ok(Json(user.clone()))
}

async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<User>, StatusCode> {
    let mut users = state.users.write().await;
    let user = users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    for (key, value) in fields {
        if key != "id" {
            user.fields.insert(key, value);
        }
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut users = state.users.write().await;
    users
        .remove(&id)
        .map(|_| Json(Value::Object(Map::new())))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_post(Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    if !(1..=3).contains(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(Post {
        user_id: 1,
        id,
        title: format!("post title {id}"),
        body: format!("post body {id}"),
    }))
}

async fn data_txt() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], DATA_TXT)
}

async fn data_json() -> Json<Value> {
    Json(serde_json::json!({"name": "Hameed", "job": "Web Developer", "age": 24}))
}

async fn data_xml() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], DATA_XML)
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body,
    })
}

/// Reply with the requested status and an empty body. Only success and
/// error ranges are served; anything else is a 400.
async fn status(Path(code): Path<u16>) -> StatusCode {
    match StatusCode::from_u16(code) {
        Ok(status) if status.is_success() || status.is_client_error() || status.is_server_error() => {
            status
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{ name: \"Hameed\", salary: \"500\" ")
}
