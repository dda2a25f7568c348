//! ApiClient tests against an in-process backend.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::{ApiClient, ApiRequest};
use crate::error::AppError;
use crate::models::Employee;

async fn spawn_backend(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

fn backend() -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(|| async {
                Json(json!([
                    {
                        "employeeId": 1,
                        "employeeName": "Ann",
                        "employeeEmail": "a@x.com",
                        "employeeJoinDate": "2023-01-05"
                    },
                    {
                        "employeeId": 2,
                        "employeeName": "Bo",
                        "employeeEmail": "b@x.com",
                        "employeeJoinDate": 1672876800000_i64
                    }
                ]))
            })
            .post(|Json(body): Json<Value>| async move { Json(json!({"received": body})) }),
        )
        .route(
            "/api/employees/{id}",
            get(|Path(id): Path<i64>| async move {
                if id == 404 {
                    Err(StatusCode::NOT_FOUND)
                } else {
                    Ok(Json(json!({"employeeId": id, "employeeName": "Ann"})))
                }
            })
            .delete(|| async { StatusCode::OK }),
        )
        .route(
            "/api/leaves/update/{id}",
            put(|Path(id): Path<i64>, Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({"leaveId": id, "status": params.get("status")}))
            }),
        )
        .route(
            "/api/payroll/generate/{id}",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/leaves", get(|| async { "not json" }))
}

#[tokio::test]
async fn test_get_collection() {
    let client = spawn_backend(backend()).await;
    let body = client.send(&ApiRequest::get("/api/employees")).await.unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_send_as_typed() {
    let client = spawn_backend(backend()).await;
    let employees: Vec<Employee> =
        client.send_as(&ApiRequest::get("/api/employees")).await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].employee_name.as_deref(), Some("Ann"));
    let joined = employees[1].employee_join_date.as_ref().map(|d| d.input_value());
    assert_eq!(joined.as_deref(), Some("2023-01-05"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let client = spawn_backend(backend()).await;
    let request = ApiRequest::post("/api/employees").json(json!({"employeeName": "Bo"}));
    let body = client.send(&request).await.unwrap();
    assert_eq!(body, json!({"received": {"employeeName": "Bo"}}));
}

#[tokio::test]
async fn test_query_parameters_sent() {
    let client = spawn_backend(backend()).await;
    let request = ApiRequest::put("/api/leaves/update/3").query("status", "APPROVED");
    let body = client.send(&request).await.unwrap();
    assert_eq!(body, json!({"leaveId": 3, "status": "APPROVED"}));
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let client = spawn_backend(backend()).await;
    let body = client.send(&ApiRequest::delete("/api/employees/1")).await.unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let client = spawn_backend(backend()).await;
    let err = client.send(&ApiRequest::get("/api/employees/404")).await.unwrap_err();
    match err {
        AppError::Status { status, .. } => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_body() {
    let client = spawn_backend(backend()).await;
    let err = client
        .send(&ApiRequest::post("/api/payroll/generate/9"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: boom");
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let client = spawn_backend(backend()).await;
    let err = client.send(&ApiRequest::get("/api/leaves")).await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let err = client.test_connection().await.unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn test_rejects_malformed_base_url() {
    for url in ["localhost:8080", "ftp://example.com", ""] {
        let err = ApiClient::new(url, Duration::from_secs(5)).err().unwrap();
        assert!(matches!(err, AppError::Config(_)), "{url}: {err}");
    }
}

/// Answer one request with a head promising more body bytes than are sent.
async fn spawn_truncating_backend(status_line: &'static str) -> ApiClient {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = format!(
            "HTTP/1.1 {status_line}\r\n\
             content-type: application/json\r\n\
             content-length: 100\r\n\r\n[1,"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
    });
    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_truncated_body_is_not_transport_error() {
    let client = spawn_truncating_backend("200 OK").await;
    let err = client.send(&ApiRequest::get("/api/employees")).await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)), "{err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    let client = spawn_truncating_backend("500 Internal Server Error").await;
    let err = client.send(&ApiRequest::delete("/api/employees/1")).await.unwrap_err();
    assert!(!err.is_transport());
    match err {
        AppError::Status { status, .. } => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
