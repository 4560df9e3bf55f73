//! Integration tests for the analysis endpoint.
use checkr_server::http::models::AnalysisResponse;
use checkr_server::http::response::ErrorEnvelope;
use checkr_server::{build_router, AppState, ANALYZE_ROUTE};

async fn make_server(max_prefixes: usize) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(AppState { max_prefixes }))
            .await
            .unwrap();
    });
    addr
}

fn url(addr: std::net::SocketAddr) -> String {
    format!("http://{}{}", addr, ANALYZE_ROUTE)
}

async fn post_cidrs(addr: std::net::SocketAddr, cidrs: &[&str]) -> reqwest::Response {
    reqwest::Client::new()
        .post(url(addr))
        .json(&serde_json::json!({ "cidrs": cidrs }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn analyze_returns_details_for_disjoint_prefixes() {
    let addr = make_server(1024).await;

    let resp = post_cidrs(addr, &["192.168.1.0/24", "10.0.0.0/8"]).await;
    assert_eq!(resp.status(), 200);

    let body: AnalysisResponse = resp.json().await.unwrap();
    assert!(!body.has_collision);
    assert!(body.overlaps.is_empty());
    assert_eq!(body.cidr_details.len(), 2);
    assert_eq!(body.cidr_details[0].cidr, "192.168.1.0/24");
    assert_eq!(body.cidr_details[0].first_ip.to_string(), "192.168.1.0");
    assert_eq!(body.cidr_details[0].last_ip.to_string(), "192.168.1.255");
    assert_eq!(body.cidr_details[0].total_hosts, 254);
    assert_eq!(body.cidr_details[1].total_hosts, 16_777_214);
}

#[tokio::test]
async fn analyze_reports_every_overlapping_pair() {
    let addr = make_server(1024).await;

    let resp = post_cidrs(addr, &["10.0.0.0/8", "10.0.0.0/9", "10.128.0.0/9"]).await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["has_collision"], true);
    assert_eq!(json["overlaps"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["overlaps"][0]["cidr1"], "10.0.0.0/8");
    assert_eq!(json["overlaps"][0]["cidr2"], "10.0.0.0/9");
    assert_eq!(json["overlaps"][0]["overlap_range"], "10.0.0.0 - 10.127.255.255");
    assert_eq!(json["overlaps"][0]["overlap_hosts"], 8_388_608);
    assert_eq!(json["overlaps"][1]["overlap_range"], "10.128.0.0 - 10.255.255.255");
}

#[tokio::test]
async fn analyze_rejects_invalid_prefix_with_details() {
    let addr = make_server(1024).await;

    let resp = post_cidrs(addr, &["not-a-cidr", "10.0.0.0/8"]).await;
    assert_eq!(resp.status(), 400);

    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.code, "INVALID_PREFIX");
    assert!(envelope.message.contains("not-a-cidr"));

    let details = envelope.details.expect("invalid prefix should carry details");
    assert_eq!(details["index"], 0);
    assert_eq!(details["cidr"], "not-a-cidr");
    assert_eq!(details["reason"], "malformed");
}

#[tokio::test]
async fn analyze_rejects_out_of_range_prefix_length() {
    let addr = make_server(1024).await;

    let resp = post_cidrs(addr, &["10.0.0.0/8", "10.0.0.0/33"]).await;
    assert_eq!(resp.status(), 400);

    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    let details = envelope.details.unwrap();
    assert_eq!(details["index"], 1);
    assert_eq!(details["reason"], "out-of-range-prefix");
}

#[tokio::test]
async fn analyze_requires_two_prefixes() {
    let addr = make_server(1024).await;

    let resp = post_cidrs(addr, &["10.0.0.0/8"]).await;
    assert_eq!(resp.status(), 400);

    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.code, "INSUFFICIENT_INPUT");
}

#[tokio::test]
async fn analyze_enforces_prefix_limit() {
    let addr = make_server(2).await;

    let resp = post_cidrs(addr, &["10.0.0.0/8", "10.0.0.0/9", "10.128.0.0/9"]).await;
    assert_eq!(resp.status(), 400);

    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.code, "TOO_MANY_PREFIXES");
}

#[tokio::test]
async fn analyze_rejects_malformed_json() {
    let addr = make_server(1024).await;

    let resp = reqwest::Client::new()
        .post(url(addr))
        .header("content-type", "application/json")
        .body("{\"cidrs\": [")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.code, "INVALID_PAYLOAD");
}

#[tokio::test]
async fn analyze_rejects_wrong_field_type() {
    let addr = make_server(1024).await;

    let resp = reqwest::Client::new()
        .post(url(addr))
        .json(&serde_json::json!({ "cidrs": "10.0.0.0/8" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn analyze_rejects_get() {
    let addr = make_server(1024).await;

    let resp = reqwest::get(url(addr)).await.unwrap();
    assert_eq!(resp.status(), 405);

    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.code, "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn healthz_is_ok() {
    let addr = make_server(1024).await;

    let resp = reqwest::get(format!("http://{}/healthz", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}
