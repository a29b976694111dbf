//! Integration tests for the upload and catalog listing routes.

mod common;

use common::TestHarness;

async fn resolve_user(addr: &std::net::SocketAddr, name: &str) -> i64 {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/diag/checkuser"))
        .form(&[("name", name)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    json["userID"].as_i64().unwrap()
}

async fn upload_image(
    addr: &std::net::SocketAddr,
    user_id: &str,
    file_name: &str,
    contents: &[u8],
) -> reqwest::Response {
    let form = reqwest::multipart::Form::new()
        .text("userID", user_id.to_string())
        .part(
            "image",
            reqwest::multipart::Part::bytes(contents.to_vec()).file_name(file_name.to_string()),
        );

    reqwest::Client::new()
        .post(format!("http://{addr}/diag/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn upload_round_trip() {
    let (_h, addr) = TestHarness::with_server().await;

    let user_id = resolve_user(&addr, "kingwang").await;
    assert_eq!(user_id, 1);

    let contents = b"0123456789";
    let resp = upload_image(&addr, "1", "snow.png", contents).await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["uploadID"], 1);
    let path = json["path"].as_str().unwrap();
    assert!(path.starts_with("/diag/img/1/"));
    assert!(path.ends_with(".png"));

    // Fetching the returned path through the static mount yields exactly
    // the uploaded bytes.
    let fetched = reqwest::get(format!("http://{addr}{path}"))
        .await
        .unwrap();
    assert_eq!(fetched.status(), 200);
    let body = fetched.bytes().await.unwrap();
    assert_eq!(&body[..], contents);
}

#[tokio::test]
async fn upload_non_integer_user_id_rejected() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = upload_image(&addr, "not-a-number", "snow.png", b"bytes").await;
    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "validation_error");
}

#[tokio::test]
async fn upload_missing_image_rejected() {
    let (_h, addr) = TestHarness::with_server().await;

    let form = reqwest::multipart::Form::new().text("userID", "1");
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/diag/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn upload_unknown_user_id_accepted() {
    let (_h, addr) = TestHarness::with_server().await;

    // The workflow trusts the supplied id; no existence check is made.
    let resp = upload_image(&addr, "999", "scan.jpg", b"data").await;
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["path"].as_str().unwrap().starts_with("/diag/img/999/"));
}

#[tokio::test]
async fn listing_reflects_all_uploads() {
    let (_h, addr) = TestHarness::with_server().await;

    let user_id = resolve_user(&addr, "lister").await;
    let user_id_str = user_id.to_string();

    let mut paths = Vec::new();
    for i in 0..3 {
        let resp = upload_image(&addr, &user_id_str, &format!("img{i}.png"), b"abc").await;
        assert_eq!(resp.status(), 200);
        let json: serde_json::Value = resp.json().await.unwrap();
        paths.push(json["path"].as_str().unwrap().to_string());
        // Distinct nanosecond timestamps for distinct blob names.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let resp = reqwest::get(format!("http://{addr}/diag/images")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();

    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    for img in images {
        assert_eq!(img["user_id"].as_i64().unwrap(), user_id);
        let path = img["path"].as_str().unwrap();
        assert!(paths.iter().any(|p| p == path));
        assert_eq!(img["tags"], "");
    }
}

#[tokio::test]
async fn listing_empty_catalog() {
    let (_h, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/diag/images")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["images"].as_array().unwrap().len(), 0);
}
