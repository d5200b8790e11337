//! Image and unavailability sub-resource round trips against a real
//! database; run with `DB_URL=postgres://... cargo test -- --ignored`.

mod common;

use axum::body::Body;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

async fn create_venue(app: &axum::Router, owner: Uuid) -> String {
    let (status, created) = common::send(
        app.clone(),
        common::with_identity(common::json_request("POST", "/venues"), owner, "venues:write")
            .body(common::json_body(&common::venue_payload()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance reachable via DB_URL"]
async fn image_lifecycle_with_thumbnail_demotion() -> anyhow::Result<()> {
    let app = common::app_with_database().await?;
    let owner = Uuid::new_v4();
    let venue_id = create_venue(&app, owner).await;
    let images_uri = format!("/venues/{}/images", venue_id);

    // First image becomes the thumbnail.
    let (status, first) = common::send(
        app.clone(),
        common::with_identity(common::json_request("POST", &images_uri), owner, "venues:images")
            .body(common::json_body(&json!({
                "url": "https://cdn.example.com/a.jpg",
                "is_thumbnail": true,
            })))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["is_thumbnail"], true);
    let first_id = first["id"].as_str().unwrap().to_string();

    // Flagging a second image demotes the first.
    let (status, second) = common::send(
        app.clone(),
        common::with_identity(common::json_request("POST", &images_uri), owner, "venues:images")
            .body(common::json_body(&json!({
                "url": "https://cdn.example.com/b.jpg",
                "is_thumbnail": true,
                "order": 1,
            })))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let second_id = second["id"].as_str().unwrap().to_string();

    let (status, listed) = common::send(
        app.clone(),
        common::request("GET", &images_uri).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let thumbnails: Vec<bool> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|img| img["is_thumbnail"].as_bool().unwrap())
        .collect();
    assert_eq!(thumbnails.iter().filter(|t| **t).count(), 1);

    // Reorder persists the positions implied by the id list.
    let (status, reordered) = common::send(
        app.clone(),
        common::with_identity(
            common::json_request("PUT", &format!("{}/reorder", images_uri)),
            owner,
            "venues:images",
        )
        .body(common::json_body(&json!([second_id, first_id])))
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = reordered.as_array().unwrap();
    assert_eq!(listed[0]["id"], second_id.as_str());
    assert_eq!(listed[0]["order"], 0);
    assert_eq!(listed[1]["id"], first_id.as_str());
    assert_eq!(listed[1]["order"], 1);

    // The schedule scope does not grant image management.
    let (status, _) = common::send(
        app.clone(),
        common::with_identity(
            common::request("DELETE", &format!("{}/{}", images_uri, first_id)),
            owner,
            "venues:schedule",
        )
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = common::send(
        app.clone(),
        common::with_identity(
            common::request("DELETE", &format!("{}/{}", images_uri, first_id)),
            owner,
            "venues:images",
        )
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Deleting it again reports the missing image.
    let (status, body) = common::send(
        app.clone(),
        common::with_identity(
            common::request("DELETE", &format!("{}/{}", images_uri, first_id)),
            owner,
            "venues:images",
        )
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    Ok(())
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance reachable via DB_URL"]
async fn unavailability_lifecycle_and_window_merge() -> anyhow::Result<()> {
    let app = common::app_with_database().await?;
    let owner = Uuid::new_v4();
    let venue_id = create_venue(&app, owner).await;
    let windows_uri = format!("/venues/{}/unavailabilities", venue_id);

    let (status, created) = common::send(
        app.clone(),
        common::with_identity(common::json_request("POST", &windows_uri), owner, "venues:schedule")
            .body(common::json_body(&json!({
                "start_datetime": "2025-06-01T10:00:00Z",
                "end_datetime": "2025-06-01T12:00:00Z",
                "reason": "Maintenance",
            })))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let window_id = created["id"].as_str().unwrap().to_string();

    // Patching only the end keeps the stored start and the reason.
    let (status, patched) = common::send(
        app.clone(),
        common::with_identity(
            common::json_request("PATCH", &format!("{}/{}", windows_uri, window_id)),
            owner,
            "venues:schedule",
        )
        .body(common::json_body(&json!({"end_datetime": "2025-06-01T14:00:00Z"})))
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["start_datetime"], "2025-06-01T10:00:00Z");
    assert_eq!(patched["reason"], "Maintenance");

    // A patch that would invert the merged window is rejected.
    let (status, body) = common::send(
        app.clone(),
        common::with_identity(
            common::json_request("PATCH", &format!("{}/{}", windows_uri, window_id)),
            owner,
            "venues:schedule",
        )
        .body(common::json_body(&json!({"end_datetime": "2025-06-01T09:00:00Z"})))
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["end_datetime"].is_string());

    // Deleting the venue cascades to its windows.
    let (status, _) = common::send(
        app.clone(),
        common::with_identity(
            common::request("DELETE", &format!("/venues/{}", venue_id)),
            owner,
            "venues:delete",
        )
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::send(
        app.clone(),
        common::request("GET", &windows_uri).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
