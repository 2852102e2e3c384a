//! A local stand-in for the remote CRUD resource.
//!
//! Serves `/dinos` and `/dinos/{id}` on `127.0.0.1:0` with the same
//! observable behaviour as crudcrud or mockapi: server-assigned ids under
//! the flavor's id field, whole-record replace on PUT, 404 for unknown
//! ids. `/broken` always answers 500.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dinodex_store::api::RecordStoreClient;
use dinodex_store::flavor::StoreFlavor;
use reqwest::Url;
use serde_json::Value;

struct MockState {
    flavor: StoreFlavor,
    records: Mutex<Vec<Value>>,
    next_id: AtomicU64,
}

impl MockState {
    fn id_of<'a>(&self, record: &'a Value) -> Option<&'a str> {
        record.get(self.flavor.id_field()).and_then(Value::as_str)
    }
}

/// A running mock store.
pub struct MockStore {
    pub base_url: Url,
    pub flavor: StoreFlavor,
    state: Arc<MockState>,
}

impl MockStore {
    /// Client pointed at the `/dinos` collection.
    pub fn client(&self) -> RecordStoreClient {
        RecordStoreClient::new(self.base_url.join("dinos").unwrap(), self.flavor)
    }

    /// Client pointed at a collection that always fails.
    pub fn broken_client(&self) -> RecordStoreClient {
        RecordStoreClient::new(self.base_url.join("broken").unwrap(), self.flavor)
    }

    /// Raw stored JSON, as the remote would hold it.
    pub fn raw_records(&self) -> Vec<Value> {
        self.state.records.lock().unwrap().clone()
    }
}

/// Start a mock store speaking `flavor` on an ephemeral port.
pub async fn spawn_mock_store(flavor: StoreFlavor) -> MockStore {
    let state = Arc::new(MockState {
        flavor,
        records: Mutex::new(Vec::new()),
        next_id: AtomicU64::new(1),
    });

    let app = Router::new()
        .route("/dinos", get(list_records).post(create_record))
        .route(
            "/dinos/{id}",
            get(get_record).put(replace_record).delete(delete_record),
        )
        .route("/broken", get(broken).post(broken))
        .route("/broken/{id}", get(broken).put(broken).delete(broken))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockStore {
        base_url: Url::parse(&format!("http://{addr}/")).unwrap(),
        flavor,
        state,
    }
}

async fn list_records(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(Value::Array(state.records.lock().unwrap().clone()))
}

async fn create_record(
    State(state): State<Arc<MockState>>,
    Json(mut body): Json<Value>,
) -> Response {
    let id = state.next_id.fetch_add(1, Ordering::SeqCst).to_string();
    body[state.flavor.id_field()] = Value::String(id);
    state.records.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn get_record(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let records = state.records.lock().unwrap();
    match records.iter().find(|r| state.id_of(r) == Some(id.as_str())) {
        Some(record) => Json(record.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn replace_record(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if body.get(state.flavor.id_field()).is_some() {
        return (StatusCode::BAD_REQUEST, "id must not be in the body").into_response();
    }

    let mut records = state.records.lock().unwrap();
    let Some(slot) = records
        .iter_mut()
        .find(|r| r.get(state.flavor.id_field()).and_then(Value::as_str) == Some(id.as_str()))
    else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    body[state.flavor.id_field()] = Value::String(id);
    *slot = body.clone();

    match state.flavor {
        StoreFlavor::CrudCrud => StatusCode::OK.into_response(),
        StoreFlavor::MockApi => Json(body).into_response(),
    }
}

async fn delete_record(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let mut records = state.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| state.id_of(r) != Some(id.as_str()));
    if records.len() == before {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }
    StatusCode::OK.into_response()
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}
