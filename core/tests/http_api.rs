//! HTTP-level tests for the transport adapter: routes, status codes, bodies.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use swiftdir_core::{
    api::{swift_code_router, AppState},
    directory::BankDirectory,
    error::{DirectoryResult, ErrorKind},
};
use tower::ServiceExt;

// ── Helpers ────────────────────────────────────────────────────

fn build_test_app() -> axum::Router {
    let _ = env_logger::builder().is_test(true).try_init();
    let directory = BankDirectory::in_memory().expect("in-memory directory");
    swift_code_router(AppState::new(directory))
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/swift-codes")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn registration(code: &str) -> Value {
    json!({
        "address": "X",
        "bankName": " New Bank ",
        "countryISO2": "pl",
        "countryName": "poland",
        "isHeadquarter": code.ends_with("XXX"),
        "swiftCode": code,
    })
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("JSON body")
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_lookup_headquarter_with_branch() {
    let app = build_test_app();

    let (status, body) = send(&app, post_json(registration("NEWPL00AKRK"))).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
    let (status, _) = send(&app, post_json(registration("NEWPL00AXXX"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/v1/swift-codes/NEWPL00AXXX")).await;
    assert_eq!(status, StatusCode::OK);
    let hq = as_json(&body);
    assert_eq!(hq["swiftCode"], "NEWPL00AXXX");
    assert_eq!(hq["bankName"], "New Bank");
    assert_eq!(hq["countryISO2"], "PL");
    assert_eq!(hq["countryName"], "POLAND");
    assert_eq!(hq["isHeadquarter"], true);
    assert_eq!(
        hq["branches"],
        json!([{
            "address": "X",
            "bankName": "New Bank",
            "countryISO2": "PL",
            "isHeadquarter": false,
            "swiftCode": "NEWPL00AKRK",
        }])
    );
}

#[tokio::test]
async fn branch_lookup_is_flat_json() {
    let app = build_test_app();
    send(&app, post_json(registration("NEWPL00AKRK"))).await;

    let (status, body) = send(&app, get("/v1/swift-codes/NEWPL00AKRK")).await;

    assert_eq!(status, StatusCode::OK);
    let branch = as_json(&body);
    assert_eq!(branch["countryName"], "POLAND");
    assert!(branch.get("branches").is_none());
}

#[tokio::test]
async fn unknown_code_is_no_content() {
    let app = build_test_app();
    let (status, body) = send(&app, get("/v1/swift-codes/NOPEPLPWXXX")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn country_roster_and_unknown_country() {
    let app = build_test_app();
    send(&app, post_json(registration("NEWPL00AXXX"))).await;
    send(&app, post_json(registration("NEWPL00BXXX"))).await;

    let (status, body) = send(&app, get("/v1/swift-codes/country/PL")).await;
    assert_eq!(status, StatusCode::OK);
    let roster = as_json(&body);
    assert_eq!(roster["countryISO2"], "PL");
    assert_eq!(roster["countryName"], "POLAND");
    assert_eq!(roster["swiftCodes"].as_array().map(Vec::len), Some(2));

    let (status, body) = send(&app, get("/v1/swift-codes/country/FR")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_bad_request() {
    let app = build_test_app();
    send(&app, post_json(registration("NEWPL00AXXX"))).await;

    let (status, body) = send(&app, post_json(registration("NEWPL00AXXX"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn malformed_payloads_are_bad_request() {
    let app = build_test_app();

    let mut wrong_type = registration("NEWPL00AXXX");
    wrong_type["bankName"] = json!(42);
    let mut missing = registration("NEWPL00AXXX");
    missing.as_object_mut().unwrap().remove("countryName");
    let mut short_code = registration("NEWPL00AXXX");
    short_code["swiftCode"] = json!("NEW");

    for payload in [wrong_type, missing, short_code] {
        let (status, body) = send(&app, post_json(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert!(as_json(&body)["error"].is_string());
    }

    let raw = Request::builder()
        .method("POST")
        .uri("/v1/swift-codes")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, _) = send(&app, raw).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_existing_and_unknown() {
    let app = build_test_app();
    send(&app, post_json(registration("NEWPL00AXXX"))).await;

    let (status, body) = send(&app, delete("/v1/swift-codes/NEWPL00AXXX")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body)["message"],
        "Bank with swift code 'NEWPL00AXXX' deleted successfully"
    );

    let (status, body) = send(&app, delete("/v1/swift-codes/NEWPL00AXXX")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        as_json(&body)["message"],
        "Bank with swift code 'NEWPL00AXXX' not found in the database."
    );

    let (status, _) = send(&app, get("/v1/swift-codes/NEWPL00AXXX")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unmatched_route_is_wrong_path() {
    let app = build_test_app();
    for uri in ["/", "/v2/swift-codes/NEWPL00AXXX", "/v1/swift-codes/country/PL/extra"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(as_json(&body), json!({ "error": "Wrong path" }));
    }
}

/// A known path with an unregistered method gets the same wrong-path 404.
#[tokio::test]
async fn unregistered_method_is_wrong_path() {
    let app = build_test_app();
    for (method, uri) in [
        ("GET", "/v1/swift-codes"),
        ("PUT", "/v1/swift-codes/ABCDPLPWXXX"),
        ("POST", "/v1/swift-codes/ABCDPLPWXXX"),
        ("DELETE", "/v1/swift-codes/country/PL"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(as_json(&body), json!({ "error": "Wrong path" }));
    }
}

/// A task that panics while holding the directory fails alone; later
/// requests are still served.
#[tokio::test]
async fn panicking_task_does_not_wedge_the_directory() {
    let state = AppState::new(BankDirectory::in_memory().unwrap());

    let err = state
        .with_directory(|_: &BankDirectory| -> DirectoryResult<()> { panic!("handler bug") })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let app = swift_code_router(state);
    let (status, _) = send(&app, post_json(registration("NEWPL00AXXX"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get("/v1/swift-codes/NEWPL00AXXX")).await;
    assert_eq!(status, StatusCode::OK);
}
