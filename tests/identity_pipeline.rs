//! Request-pipeline behavior that never reaches the store: identity header
//! handling, payload validation, and pure scope gates.

mod common;

use axum::body::Body;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn missing_identity_headers_return_422_never_401() {
    let (status, body) = common::send(
        common::app(),
        common::json_request("POST", "/venues")
            .body(common::json_body(&common::venue_payload()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTHENTICATION_MISSING");
    assert!(body["field_errors"]["x-user-id"].is_string());
    assert!(body["field_errors"]["x-username"].is_string());
    assert!(body["field_errors"]["x-user-scopes"].is_string());
}

#[tokio::test]
async fn partial_identity_headers_report_only_missing_ones() {
    let (status, body) = common::send(
        common::app(),
        common::json_request("POST", "/venues")
            .header("x-user-id", Uuid::new_v4().to_string())
            .body(common::json_body(&common::venue_payload()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"].get("x-user-id").is_none());
    assert!(body["field_errors"]["x-username"].is_string());
}

#[tokio::test]
async fn malformed_user_id_header_is_422() {
    let (status, body) = common::send(
        common::app(),
        common::json_request("POST", "/venues")
            .header("x-user-id", "not-a-uuid")
            .header("x-username", "tester")
            .header("x-user-scopes", "venues:write")
            .body(common::json_body(&common::venue_payload()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["x-user-id"], "must be a valid UUID");
}

#[tokio::test]
async fn delete_requires_identity() {
    let (status, body) = common::send(
        common::app(),
        common::request("DELETE", &format!("/venues/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "AUTHENTICATION_MISSING");
}

#[tokio::test]
async fn create_without_write_scope_is_403() {
    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("POST", "/venues"),
            Uuid::new_v4(),
            "venues:read",
        )
        .body(common::json_body(&common::venue_payload()))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn create_with_empty_scope_header_is_403() {
    let (status, _) = common::send(
        common::app(),
        common::with_identity(common::json_request("POST", "/venues"), Uuid::new_v4(), "")
            .body(common::json_body(&common::venue_payload()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_with_invalid_payload_is_422_with_field_errors() {
    let mut payload = common::venue_payload();
    payload["name"] = json!("X");

    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("POST", "/venues"),
            Uuid::new_v4(),
            "venues:write",
        )
        .body(common::json_body(&payload))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["name"].is_string());
}

#[tokio::test]
async fn unknown_sport_type_is_422() {
    let mut payload = common::venue_payload();
    payload["sport_types"] = json!(["zorbing"]);

    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("POST", "/venues"),
            Uuid::new_v4(),
            "venues:write",
        )
        .body(common::json_body(&payload))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_json_body_is_422() {
    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("POST", "/venues"),
            Uuid::new_v4(),
            "venues:write",
        )
        .body(Body::from("{ this is not json"))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn working_hours_with_bad_day_key_is_422() {
    let mut payload = common::venue_payload();
    payload["working_hours"] = json!({"8": {"open": "08:00", "close": "22:00"}});

    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("POST", "/venues"),
            Uuid::new_v4(),
            "venues:write",
        )
        .body(common::json_body(&payload))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["working_hours"].is_string());
}

#[tokio::test]
async fn status_update_without_admin_scope_is_403() {
    let (status, _) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("PATCH", &format!("/venues/{}/status", Uuid::new_v4())),
            Uuid::new_v4(),
            "venues:write venues:delete",
        )
        .body(common::json_body(&json!({"status": "active"})))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn status_update_with_unknown_status_is_422() {
    let (status, _) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("PATCH", &format!("/venues/{}/status", Uuid::new_v4())),
            Uuid::new_v4(),
            "admin:venues",
        )
        .body(common::json_body(&json!({"status": "flying"})))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unavailability_with_inverted_window_is_422() {
    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request(
                "POST",
                &format!("/venues/{}/unavailabilities", Uuid::new_v4()),
            ),
            Uuid::new_v4(),
            "venues:schedule",
        )
        .body(common::json_body(&json!({
            "start_datetime": "2025-06-02T10:00:00Z",
            "end_datetime": "2025-06-01T10:00:00Z",
        })))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn image_with_negative_order_is_422() {
    let (status, body) = common::send(
        common::app(),
        common::with_identity(
            common::json_request("POST", &format!("/venues/{}/images", Uuid::new_v4())),
            Uuid::new_v4(),
            "venues:images",
        )
        .body(common::json_body(&json!({
            "url": "https://cdn.example.com/court.jpg",
            "order": -1,
        })))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["order"].is_string());
}

#[tokio::test]
async fn reorder_requires_identity() {
    let (status, _) = common::send(
        common::app(),
        common::json_request(
            "PUT",
            &format!("/venues/{}/images/reorder", Uuid::new_v4()),
        )
        .body(common::json_body(&json!([])))
        .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn liveness_needs_no_database() {
    let (status, body) = common::send(
        common::app(),
        common::request("GET", "/health/live").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn root_describes_the_service() {
    let (status, body) = common::send(
        common::app(),
        common::request("GET", "/").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "venue-api");
    assert!(body["endpoints"]["venues"].is_string());
}
