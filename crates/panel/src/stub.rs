//! Local HTTP stand-in for the panel and its node, used by the client tests

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Headers and payloads of one request that reached the stub
#[derive(Debug, Clone)]
pub struct Recorded {
    pub route: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
}

pub struct Stub {
    pub base: String,
    pub requests: Mutex<Vec<Recorded>>,
}

impl Stub {
    pub fn requests_to(&self, route: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.route == route)
            .cloned()
            .collect()
    }

    fn record(&self, route: &str, headers: &HeaderMap, query: HashMap<String, String>, body: &[u8]) {
        self.requests.lock().push(Recorded {
            route: route.to_string(),
            authorization: header_value(headers, header::AUTHORIZATION),
            accept: header_value(headers, header::ACCEPT),
            content_type: header_value(headers, header::CONTENT_TYPE),
            query,
            body: body.to_vec(),
        });
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Serves on an ephemeral local port until the test runtime shuts down
pub async fn spawn() -> Arc<Stub> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let stub = Arc::new(Stub {
        base,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api/client", get(list_servers))
        .route("/api/client/servers/:id/files/create-folder", post(create_folder))
        .route("/api/client/servers/:id/files/list", get(list_files))
        .route("/api/client/servers/:id/files/upload", get(upload_url))
        .route("/node/upload/file", post(receive_upload))
        .with_state(Arc::clone(&stub));

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });

    stub
}

/// Two pages, one server each
async fn list_servers(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    stub.record("list", &headers, query, &[]);

    Json(json!({
        "object": "list",
        "data": [{
            "object": "server",
            "attributes": {
                "identifier": format!("srv{}", page),
                "internal_id": page,
                "uuid": format!("srv{}-uuid", page),
                "name": format!("Retakes #{}", page),
                "docker_image": "ghcr.io/example/cs2:latest",
                "relationships": {
                    "egg": {
                        "object": "egg",
                        "attributes": { "uuid": "cs2-egg-uuid", "name": "Counter-Strike 2" }
                    }
                }
            }
        }],
        "meta": {
            "pagination": {
                "total": 2,
                "count": 1,
                "per_page": 1,
                "current_page": page,
                "total_pages": 2
            }
        }
    }))
}

/// Status depends on the folder name: `exists` -> 400, `taken` -> 409, `denied` -> 403
async fn create_folder(
    State(stub): State<Arc<Stub>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    stub.record("create-folder", &headers, HashMap::new(), &body);

    let name = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v["name"].as_str().map(str::to_string))
        .unwrap_or_default();

    match name.as_str() {
        "exists" => StatusCode::BAD_REQUEST,
        "taken" => StatusCode::CONFLICT,
        "denied" => StatusCode::FORBIDDEN,
        _ => StatusCode::NO_CONTENT,
    }
}

/// Server `broken` answers with a non-JSON body
async fn list_files(
    State(stub): State<Arc<Stub>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    stub.record("list-files", &headers, query, &[]);

    if id == "broken" {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    Json(json!({
        "object": "list",
        "data": [
            { "object": "file_object", "attributes": { "name": "cfg", "is_file": false } },
            { "object": "file_object", "attributes": { "name": "server.cfg", "is_file": true } }
        ]
    }))
    .into_response()
}

async fn upload_url(
    State(stub): State<Arc<Stub>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.record("upload-url", &headers, query, &[]);

    Json(json!({
        "object": "signed_url",
        "attributes": { "url": format!("{}/node/upload/file?token=signed-secret", stub.base) }
    }))
}

async fn receive_upload(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> StatusCode {
    stub.record("node-upload", &headers, query, &body);
    StatusCode::OK
}
