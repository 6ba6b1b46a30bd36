use super::*;

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{Category, ResolutionDraft, ResolutionId};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: Method,
    table: String,
    query: HashMap<String, String>,
    headers: HashMap<String, String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct FakeRestStore {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    rows: Arc<Mutex<Vec<Value>>>,
}

impl FakeRestStore {
    fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    async fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("at least one request")
    }
}

fn id_filter(query: &HashMap<String, String>) -> Option<String> {
    query
        .get("id")
        .and_then(|raw| raw.strip_prefix("eq."))
        .map(str::to_string)
}

async fn handle_table(
    State(store): State<FakeRestStore>,
    Path(table): Path<String>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body_json = serde_json::from_slice::<Value>(&body).ok();
    store.requests.lock().await.push(RecordedRequest {
        method: method.clone(),
        table: table.clone(),
        query: query.clone(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: body_json.clone(),
    });

    if table != "resolutions" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "message": format!("relation \"public.{table}\" does not exist"),
                "code": "42P01"
            })),
        )
            .into_response();
    }

    let mut rows = store.rows.lock().await;
    if method == Method::GET {
        return Json(Value::Array(rows.clone())).into_response();
    }
    if method == Method::POST {
        if let Some(Value::Array(new_rows)) = body_json {
            rows.extend(new_rows);
        }
        return StatusCode::CREATED.into_response();
    }
    if method == Method::PATCH {
        let Some(id) = id_filter(&query) else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if row["id"] == Value::String(id.clone()) {
                if let (Some(target), Some(Value::Object(patch))) =
                    (row.as_object_mut(), body_json.as_ref())
                {
                    for (k, v) in patch {
                        target.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        return Json(Value::Array(updated)).into_response();
    }
    if method == Method::DELETE {
        if let Some(id) = id_filter(&query) {
            rows.retain(|row| row["id"] != Value::String(id.clone()));
        }
        return StatusCode::NO_CONTENT.into_response();
    }
    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

async fn spawn_fake_store(store: FakeRestStore) -> String {
    let app = Router::new()
        .route("/rest/v1/:table", any(handle_table))
        .with_state(store);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn stored_row(id: &str, title: &str, progress: u8, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "category": "Growth",
        "progress": progress,
        "why": "keep growing",
        "created_at": created_at,
        "updated_at": created_at
    })
}

#[tokio::test]
async fn select_uses_postgrest_order_and_auth_headers() {
    let fake = FakeRestStore::with_rows(vec![
        stored_row("b", "Newer", 10, "2026-01-02T00:00:00+00:00"),
        stored_row("a", "Older", 90, "2026-01-01T00:00:00+00:00"),
    ]);
    let base = spawn_fake_store(fake.clone()).await;
    let store = RestCollectionStore::new(&base, Some("anon-key".into())).expect("store");
    let repository = ResolutionRepository::new(Arc::new(store));

    let listed = repository.list().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Newer");
    assert_eq!(listed[1].progress, 90);

    let request = fake.last_request().await;
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.table, "resolutions");
    assert_eq!(request.query.get("select").map(String::as_str), Some("*"));
    assert_eq!(
        request.query.get("order").map(String::as_str),
        Some("created_at.desc")
    );
    assert_eq!(request.headers.get("apikey").map(String::as_str), Some("anon-key"));
    assert_eq!(
        request.headers.get("authorization").map(String::as_str),
        Some("Bearer anon-key")
    );
}

#[tokio::test]
async fn requests_omit_auth_headers_without_api_key() {
    let fake = FakeRestStore::default();
    let base = spawn_fake_store(fake.clone()).await;
    let store = RestCollectionStore::new(&base, Some("   ".into())).expect("store");

    store
        .select("resolutions", &SelectQuery::all())
        .await
        .expect("select");

    let request = fake.last_request().await;
    assert!(!request.headers.contains_key("apikey"));
    assert!(!request.headers.contains_key("authorization"));
    assert!(!request.query.contains_key("order"));
}

#[tokio::test]
async fn create_posts_single_row_array_with_minimal_return() {
    let fake = FakeRestStore::default();
    let base = spawn_fake_store(fake.clone()).await;
    let repository = ResolutionRepository::new(Arc::new(
        RestCollectionStore::new(&base, None).expect("store"),
    ));

    let draft = ResolutionDraft::new("Run a marathon", Category::Health, 0, "stay fit");
    repository.create(&draft).await.expect("create");

    let request = fake.last_request().await;
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.headers.get("prefer").map(String::as_str),
        Some("return=minimal")
    );
    let body = request.body.expect("json body");
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Run a marathon");
    assert_eq!(rows[0]["category"], "Health");
    assert_eq!(rows[0]["progress"], 0);
    assert!(rows[0].get("id").is_none());
}

#[tokio::test]
async fn patch_progress_filters_by_id_and_sends_partial_body() {
    let fake = FakeRestStore::with_rows(vec![stored_row(
        "r-1",
        "Learn Rust",
        20,
        "2026-01-01T00:00:00+00:00",
    )]);
    let base = spawn_fake_store(fake.clone()).await;
    let repository = ResolutionRepository::new(Arc::new(
        RestCollectionStore::new(&base, None).expect("store"),
    ));

    repository
        .patch_progress(&ResolutionId::from("r-1"), 75)
        .await
        .expect("patch progress");

    let request = fake.last_request().await;
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.query.get("id").map(String::as_str), Some("eq.r-1"));
    let body = request.body.expect("patch body");
    let object = body.as_object().expect("object");
    assert_eq!(object.len(), 2);
    assert_eq!(object["progress"], 75);
    assert!(object.contains_key("updated_at"));

    let listed = repository.list().await.expect("list");
    assert_eq!(listed[0].progress, 75);
    assert_eq!(listed[0].title, "Learn Rust");
}

#[tokio::test]
async fn update_of_unknown_id_is_a_store_error() {
    let fake = FakeRestStore::default();
    let base = spawn_fake_store(fake).await;
    let repository = ResolutionRepository::new(Arc::new(
        RestCollectionStore::new(&base, None).expect("store"),
    ));

    let draft = ResolutionDraft::new("Ghost", Category::Tech, 5, "nobody");
    let err = repository
        .update(&ResolutionId::from("missing"), &draft)
        .await
        .expect_err("unknown id");
    assert!(err.message().contains("matched no rows"));
}

#[tokio::test]
async fn delete_sends_id_filter_and_tolerates_absent_rows() {
    let fake = FakeRestStore::with_rows(vec![stored_row(
        "r-9",
        "Drop it",
        0,
        "2026-01-01T00:00:00+00:00",
    )]);
    let base = spawn_fake_store(fake.clone()).await;
    let repository = ResolutionRepository::new(Arc::new(
        RestCollectionStore::new(&base, None).expect("store"),
    ));

    repository
        .delete(&ResolutionId::from("r-9"))
        .await
        .expect("delete");
    let request = fake.last_request().await;
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.query.get("id").map(String::as_str), Some("eq.r-9"));

    repository
        .delete(&ResolutionId::from("r-9"))
        .await
        .expect("second delete is still a success");
    assert!(repository.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn error_status_surfaces_remote_message() {
    let fake = FakeRestStore::default();
    let base = spawn_fake_store(fake).await;
    let store = RestCollectionStore::new(&base, None).expect("store");

    let err = store
        .select("broken", &SelectQuery::all())
        .await
        .expect_err("missing table");
    assert!(err.message().contains("404"));
    assert!(err.message().contains("relation \"public.broken\" does not exist"));
    assert!(err.message().contains("42P01"));
}

#[tokio::test]
async fn transport_failure_is_a_store_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let repository = ResolutionRepository::new(Arc::new(
        RestCollectionStore::new(&format!("http://{addr}"), None).expect("store"),
    ));
    assert!(repository.list().await.is_err());
}

#[test]
fn base_url_gains_trailing_slash_for_path_prefixes() {
    let store =
        RestCollectionStore::new("https://example.test/proxy", None).expect("store");
    assert_eq!(store.base_url().as_str(), "https://example.test/proxy/");
}
