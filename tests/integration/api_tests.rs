//! Smoke tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:8080";
const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn create_author(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": "Test",
            "last_name": "Author"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No author ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_index_page() {
    let client = Client::new();

    let response = client
        .get(format!("{}/", SERVER_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("num-available"));
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["num_books"].is_number());
    assert!(body["num_instances"].is_number());
    assert!(body["num_available"].is_number());
    assert!(body["num_authors"].is_number());
    assert!(body["genres"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_book_copy_and_delete() {
    let client = Client::new();
    let author_id = create_author(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "author_id": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");
    assert_eq!(book["url"], format!("/api/v1/books/{}", book_id));

    let response = client
        .post(format!("{}/instances", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let instance: Value = response.json().await.expect("Failed to parse response");
    let instance_id = instance["id"].as_i64().expect("No instance ID");
    assert_eq!(instance["status"], "available");
    assert_eq!(instance["is_overdue"], false);

    // Deleting the author cascades to the book and its copy
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/instances/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_invalid_status_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/instances", BASE_URL))
        .json(&json!({ "book_id": 1, "status": "lost" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
