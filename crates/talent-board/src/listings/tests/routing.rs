use super::common::*;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::listings::router::listing_router;

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn get(uri: &str) -> Response {
    listing_router(bundled_service(4))
        .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router responds")
}

#[tokio::test]
async fn job_search_ranks_and_paginates() {
    let response = get("/api/v1/jobs?as_of=2024-01-23").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 4);
    assert_eq!(body["total_items"], 7);
    assert_eq!(body["total_pages"], 2);
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["id"], "4");
    assert_eq!(items[0]["matching_skills"], 3);
    assert_eq!(items[0]["type"], "2-3 years");
}

#[tokio::test]
async fn job_search_applies_filters_from_query_string() {
    let response =
        get("/api/v1/jobs?skills=Python&types=Fresher&window=last7days&as_of=2024-01-23").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Data Science Intern");
    assert_eq!(items[0]["posted_label"], "5 days ago");
}

#[tokio::test]
async fn job_search_rejects_unknown_window() {
    let response = get("/api/v1/jobs?window=fortnight").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("fortnight"));
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let response = get("/api/v1/jobs/404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applications_listing_filters_by_status() {
    let response = get("/api/v1/applications?status=Applied&as_of=2024-01-21").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_items"], 4);
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items[0]["id"], "app-003");
    assert_eq!(items[0]["recent"], false);
}

#[tokio::test]
async fn application_summary_counts_statuses() {
    let body = body_json(get("/api/v1/applications/summary").await).await;
    assert_eq!(body["total"], 12);
    assert_eq!(body["by_status"]["Applied"], 4);
    assert_eq!(body["by_status"]["Offer"], 1);
}

#[tokio::test]
async fn invitations_listing_includes_counts() {
    let body = body_json(get("/api/v1/invitations?query=figma").await).await;
    let invitations = body["invitations"].as_array().expect("invitations");
    assert_eq!(invitations.len(), 1);
    assert_eq!(invitations[0]["mentor"]["name"], "Alex Rodriguez");
    assert_eq!(body["counts"]["by_status"]["Pending"], 2);
}

#[tokio::test]
async fn apply_route_accepts_complete_forms() {
    let service = bundled_service(8);
    let job = service
        .job(&crate::listings::domain::JobId("1".to_string()))
        .expect("job 1")
        .clone();
    let form = complete_form(&job);

    let response = listing_router(service)
        .oneshot(
            Request::post("/api/v1/jobs/1/applications")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&form).expect("form json")))
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["company"], "TechCorp Solutions");
}

#[tokio::test]
async fn apply_route_returns_advisory_for_invalid_forms() {
    let payload = json!({
        "full_name": "Sam",
        "email": "sam@example.edu",
        "phone": "555",
        "resume": {
            "file_name": "resume.png",
            "content_type": "image/png",
            "size_bytes": 1024
        }
    });

    let response = listing_router(bundled_service(8))
        .oneshot(
            Request::post("/api/v1/jobs/1/applications")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Invalid File Type");
}

async fn post_empty(router: &axum::Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::post(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router responds")
}

#[tokio::test]
async fn invitation_accept_route_records_reply_once() {
    let router = listing_router(bundled_service(8));

    let response = post_empty(&router, "/api/v1/invitations/inv-1/accept").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Invitation Accepted");
    assert_eq!(body["invitation"]["status"], "Accepted");

    let repeat = post_empty(&router, "/api/v1/invitations/inv-1/decline").await;
    assert_eq!(repeat.status(), StatusCode::CONFLICT);

    let listing = router
        .clone()
        .oneshot(
            Request::get("/api/v1/invitations")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router responds");
    let body = body_json(listing).await;
    assert_eq!(body["counts"]["by_status"]["Pending"], 1);
    assert_eq!(body["counts"]["by_status"]["Accepted"], 2);
}

#[tokio::test]
async fn unknown_invitation_reply_is_not_found() {
    let router = listing_router(bundled_service(8));
    let response = post_empty(&router, "/api/v1/invitations/inv-99/decline").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invitation 'inv-99' not found");
}
