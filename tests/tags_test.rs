//! Integration tests for tag mutation and the tag vocabulary route.

mod common;

use common::{TestHarness, TAG_VOCABULARY};

async fn seed_upload(addr: &std::net::SocketAddr) -> i64 {
    let client = reqwest::Client::new();

    client
        .post(format!("http://{addr}/diag/checkuser"))
        .form(&[("name", "kingwang")])
        .send()
        .await
        .unwrap();

    let form = reqwest::multipart::Form::new().text("userID", "1").part(
        "image",
        reqwest::multipart::Part::bytes(b"0123456789".to_vec()).file_name("snow.png"),
    );
    let resp = client
        .post(format!("http://{addr}/diag/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    json["uploadID"].as_i64().unwrap()
}

async fn tags_of(addr: &std::net::SocketAddr, upload_id: i64) -> String {
    let resp = reqwest::get(format!("http://{addr}/diag/images")).await.unwrap();
    let json: serde_json::Value = resp.json().await.unwrap();
    json["images"]
        .as_array()
        .unwrap()
        .iter()
        .find(|img| img["id"].as_i64() == Some(upload_id))
        .unwrap()["tags"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn set_tag_applies_to_listing() {
    let (_h, addr) = TestHarness::with_server().await;
    let upload_id = seed_upload(&addr).await;
    assert_eq!(upload_id, 1);

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/diag/settag"))
        .json(&serde_json::json!({"id": upload_id, "tags": "winter"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(tags_of(&addr, upload_id).await, "winter");
}

#[tokio::test]
async fn set_tag_overwrites_not_merges() {
    let (_h, addr) = TestHarness::with_server().await;
    let upload_id = seed_upload(&addr).await;
    let client = reqwest::Client::new();

    for tags in ["a,b", "c"] {
        let resp = client
            .post(format!("http://{addr}/diag/settag"))
            .json(&serde_json::json!({"id": upload_id, "tags": tags}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(tags_of(&addr, upload_id).await, "c");
}

#[tokio::test]
async fn set_tag_accepts_urlencoded_form() {
    let (_h, addr) = TestHarness::with_server().await;
    let upload_id = seed_upload(&addr).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/diag/settag"))
        .form(&[("id", upload_id.to_string()), ("tags", "pale".into())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(tags_of(&addr, upload_id).await, "pale");
}

#[tokio::test]
async fn set_tag_on_nonexistent_id_succeeds() {
    let (_h, addr) = TestHarness::with_server().await;

    // Best-effort contract: no existence check, zero rows affected is fine.
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/diag/settag"))
        .json(&serde_json::json!({"id": 999_999, "tags": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn set_tag_malformed_body_rejected() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/diag/settag"))
        .json(&serde_json::json!({"id": "not-a-number", "tags": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn tag_vocabulary_served_verbatim() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/diag/tags")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    let body = resp.bytes().await.unwrap();
    assert_eq!(&body[..], TAG_VOCABULARY);
}

#[tokio::test]
async fn tag_vocabulary_missing_file_is_server_error() {
    let (h, addr) = TestHarness::with_server().await;

    std::fs::remove_file(h.tags_file()).unwrap();

    let resp = reqwest::get(format!("http://{addr}/diag/tags")).await.unwrap();
    assert_eq!(resp.status(), 500);
}
