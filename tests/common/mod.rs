//! In-process mock of an Opendatasoft portal
#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::{StreamExt, stream};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const API: &str = "/api/explore/v2.1/catalog/datasets";

/// Canned answer for one path
#[derive(Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, String),
    /// Chunked body, one chunk every few milliseconds
    Chunks(Vec<String>),
    /// Sends `prefix` then drops the connection
    BrokenAfter(String),
}

#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub query: HashMap<String, String>,
}

#[derive(Default)]
struct PortalState {
    routes: Mutex<HashMap<String, Reply>>,
    hits: Mutex<Vec<Hit>>,
}

pub struct MockPortal {
    pub url: String,
    state: Arc<PortalState>,
}

impl MockPortal {
    pub async fn start() -> Self {
        let state = Arc::new(PortalState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
        let bound = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", bound),
            state,
        }
    }

    pub fn route(&self, path: &str, reply: Reply) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), reply);
    }

    pub fn dataset(&self, id: &str, record: Value) {
        self.route(&format!("{API}/{id}"), Reply::Json(StatusCode::OK, record));
    }

    pub fn export(&self, id: &str, format: &str, reply: Reply) {
        self.route(&format!("{API}/{id}/exports/{format}"), reply);
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn hits_for(&self, path: &str) -> Vec<Hit> {
        self.hits().into_iter().filter(|h| h.path == path).collect()
    }
}

async fn handle(
    State(state): State<Arc<PortalState>>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push(Hit {
        path: path.clone(),
        query,
    });

    let reply = state.routes.lock().unwrap().get(&path).cloned();
    match reply {
        None => (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "not found" })))
            .into_response(),
        Some(Reply::Json(status, value)) => (status, Json(value)).into_response(),
        Some(Reply::Text(status, body)) => (status, body).into_response(),
        Some(Reply::Chunks(chunks)) => {
            let body = stream::iter(chunks).then(|chunk| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok::<_, std::io::Error>(Bytes::from(chunk))
            });
            Response::new(Body::from_stream(body))
        }
        Some(Reply::BrokenAfter(prefix)) => {
            let items = vec![
                Ok(Bytes::from(prefix)),
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection dropped",
                )),
            ];
            let body = stream::iter(items).then(|item| async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                item
            });
            Response::new(Body::from_stream(body))
        }
    }
}
