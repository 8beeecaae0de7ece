//! End-to-end tests for the HTTP surface, driving the router directly.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use minipaste::config::Config;
use minipaste::db::Database;
use minipaste::server::{build_router, AppState};

const BOUNDARY: &str = "------------------------minipaste-test";

async fn test_router() -> axum::Router {
    let database = Database::connect_in_memory().await.unwrap();
    build_router(AppState {
        config: Config::default(),
        database,
    })
}

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn paste_request(fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/paste")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields)))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn create_returns_json_paste_record() {
    let router = test_router().await;

    let resp = router
        .oneshot(paste_request(&[("text", "hello world"), ("language", "text")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["content"], "hello world");
    assert_eq!(json["language"], "text");

    let paste_id = json["pasteId"].as_str().unwrap();
    assert_eq!(paste_id.len(), 14);
    assert!(paste_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

#[tokio::test]
async fn created_paste_is_displayed_as_html() {
    let router = test_router().await;

    let resp = router
        .clone()
        .oneshot(paste_request(&[("text", "hello world"), ("language", "text")]))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    let paste_id = json["pasteId"].as_str().unwrap().to_owned();

    let resp = router
        .oneshot(
            Request::builder()
                .uri(format!("/{paste_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let page = body_string(resp).await;
    assert!(page.contains("hello world"));
}

#[tokio::test]
async fn unknown_identifier_returns_404_not_found() {
    let router = test_router().await;

    let resp = router
        .oneshot(
            Request::builder()
                .uri("/nonexistent-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp).await, "Not Found");
}

#[tokio::test]
async fn empty_paste_round_trips() {
    let router = test_router().await;

    let resp = router
        .clone()
        .oneshot(paste_request(&[("text", ""), ("language", "")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(json["content"], "");
    // empty language is omitted from the JSON record
    assert!(json.get("language").is_none());

    let paste_id = json["pasteId"].as_str().unwrap().to_owned();
    let resp = router
        .oneshot(
            Request::builder()
                .uri(format!("/{paste_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn sequential_creates_return_distinct_identifiers() {
    let router = test_router().await;

    let mut seen = std::collections::HashSet::new();
    for n in 0..3 {
        let resp = router
            .clone()
            .oneshot(paste_request(&[("text", &format!("paste {n}"))]))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(seen.insert(json["pasteId"].as_str().unwrap().to_owned()));
    }
}

#[tokio::test]
async fn repeated_fetches_return_the_same_page() {
    let router = test_router().await;

    let resp = router
        .clone()
        .oneshot(paste_request(&[("text", "stable"), ("language", "text")]))
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    let uri = format!("/{}", json["pasteId"].as_str().unwrap());

    let first = router
        .clone()
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let second = router
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_string(first).await, body_string(second).await);
}
