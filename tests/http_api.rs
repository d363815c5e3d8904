//! End-to-end tests over the real router with the in-memory repo.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use school_api::{common_routes, student_routes, AppState, MemoryStudentRepo};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStudentRepo::new()));
    Router::new()
        .merge(common_routes())
        .nest("/students", student_routes(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

fn asha() -> Value {
    json!({
        "registrationNo": "REG-2024-0001",
        "name": "Asha",
        "class": "10A",
        "rollNo": 5,
        "contactNumber": "9876543210"
    })
}

#[tokio::test]
async fn welcome_banner() {
    let app = app();
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to School Management System API");
}

#[tokio::test]
async fn health_and_version() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "school-api");
}

#[tokio::test]
async fn create_then_fetch_then_duplicate() {
    let app = app();

    let (status, body) = send(&app, "POST", "/students", Some(asha())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student created successfully");
    assert_eq!(body["data"]["status"], json!(true));
    assert_eq!(body["data"]["registrationNo"], "REG-2024-0001");
    assert_eq!(body["data"]["rollNo"], json!(5));
    assert_eq!(body["data"]["class"], "10A");

    let (status, body) = send(&app, "GET", "/students/REG-2024-0001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Asha");

    let (status, body) = send(&app, "POST", "/students", Some(asha())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        "Student with this registration number already exists"
    );
}

#[tokio::test]
async fn create_rejects_invalid_body_with_all_errors() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/students",
        Some(json!({
            "registrationNo": "REG-24-1",
            "rollNo": -2,
            "contactNumber": "12345"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    let details = body["error"]["details"].as_array().expect("details list");
    assert_eq!(details.len(), 5);
    assert!(details.contains(&json!("Name is required")));
    assert!(details.contains(&json!(
        "Invalid registration number format. Expected: REG-YYYY-XXXX"
    )));
    assert!(details.contains(&json!("Roll number must be a positive integer")));
    assert!(details.contains(&json!("Contact number must be a 10-digit number")));
}

#[tokio::test]
async fn roll_conflict_on_create() {
    let app = app();
    send(&app, "POST", "/students", Some(asha())).await;

    let mut other = asha();
    other["registrationNo"] = json!("REG-2024-0002");
    other["name"] = json!("Bina");
    let (status, body) = send(&app, "POST", "/students", Some(other)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        "Roll number 5 is already assigned in class 10A"
    );
}

#[tokio::test]
async fn malformed_reg_no_param_is_rejected() {
    let app = app();
    let (status, body) = send(&app, "GET", "/students/REG-24-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/students/REG-2024-0009", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Student not found");
}

#[tokio::test]
async fn update_merges_and_preserves_roll_no_zero_quirk() {
    let app = app();
    send(&app, "POST", "/students", Some(asha())).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/students/REG-2024-0001",
        Some(json!({"rollNo": 0, "name": "Asha Rao"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student updated successfully");
    assert_eq!(body["data"]["name"], "Asha Rao");
    // rollNo 0 is treated as not supplied
    assert_eq!(body["data"]["rollNo"], json!(5));
}

#[tokio::test]
async fn update_with_null_status_deactivates() {
    let app = app();
    send(&app, "POST", "/students", Some(asha())).await;

    // an explicit null status is supplied, coerces to false
    let (status, body) = send(
        &app,
        "PUT",
        "/students/REG-2024-0001",
        Some(json!({"status": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!(false));

    let (_, body) = send(&app, "GET", "/students/REG-2024-0001", None).await;
    assert_eq!(body["data"]["status"], json!(false));
}

#[tokio::test]
async fn update_to_taken_pair_conflicts() {
    let app = app();
    send(&app, "POST", "/students", Some(asha())).await;
    let mut other = asha();
    other["registrationNo"] = json!("REG-2024-0002");
    other["name"] = json!("Bina");
    other["rollNo"] = json!(6);
    send(&app, "POST", "/students", Some(other)).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/students/REG-2024-0002",
        Some(json!({"rollNo": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_pagination_meta_and_order() {
    let app = app();
    for (reg, name, roll) in [
        ("REG-2024-0001", "Chitra", 1),
        ("REG-2024-0002", "Asha", 2),
        ("REG-2024-0003", "Bina", 3),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/students",
            Some(json!({
                "registrationNo": reg,
                "name": name,
                "class": "10A",
                "rollNo": roll,
                "contactNumber": "9876543210"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/students?page=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|s| s["name"].as_str().expect("name").to_string())
        .collect();
    assert_eq!(names, vec!["Asha", "Bina"]);
    assert_eq!(
        body["meta"],
        json!({"total": 3, "page": 1, "limit": 2, "totalPages": 2})
    );

    let (status, body) = send(&app, "GET", "/students?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Page and limit must be positive integers"
    );

    // a page whose offset would overflow i64 gets the same rejection
    let (status, body) = send(
        &app,
        "GET",
        "/students?page=9223372036854775807&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Page and limit must be positive integers"
    );
}

#[tokio::test]
async fn list_status_filter() {
    let app = app();
    send(&app, "POST", "/students", Some(asha())).await;
    let mut other = asha();
    other["registrationNo"] = json!("REG-2024-0002");
    other["name"] = json!("Bina");
    other["rollNo"] = json!(6);
    send(&app, "POST", "/students", Some(other)).await;
    send(&app, "DELETE", "/students/REG-2024-0002", None).await;

    let (_, body) = send(&app, "GET", "/students?status=true", None).await;
    assert_eq!(body["meta"]["total"], json!(1));
    assert_eq!(body["data"][0]["name"], "Asha");

    let (_, body) = send(&app, "GET", "/students?status=anything-else", None).await;
    assert_eq!(body["data"][0]["name"], "Bina");
}

#[tokio::test]
async fn soft_delete_then_permanent_delete() {
    let app = app();
    send(&app, "POST", "/students", Some(asha())).await;

    let (status, body) = send(&app, "DELETE", "/students/REG-2024-0001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deactivated successfully");

    // soft-deleted records stay addressable
    let (status, body) = send(&app, "GET", "/students/REG-2024-0001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!(false));

    // and soft delete is idempotent
    let (status, _) = send(&app, "DELETE", "/students/REG-2024-0001", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "DELETE",
        "/students/REG-2024-0001?permanent=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student permanently deleted");

    let (status, _) = send(&app, "GET", "/students/REG-2024-0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/students/REG-2024-0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
