//! End-to-end tests against a running server and database

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:3000";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_search_and_delete_book() {
    let client = client();

    let response = client
        .post(format!("{}/", BASE_URL))
        .form(&[("title", "The Left Hand of Darkness"), ("author", "Le Guin"), ("year", "1969")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/");

    let response = client
        .get(format!("{}/search", BASE_URL))
        .query(&[("query", "left hand of darkness")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Le Guin"));

    // Find the id from the edit link
    let marker = "\">The Left Hand of Darkness</a>";
    let end = body.find(marker).expect("Book link missing");
    let start = body[..end].rfind("href=\"/").expect("Book href missing") + "href=\"/".len();
    let id = &body[start..end];

    let response = client
        .post(format!("{}/{}/delete", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = client
        .get(format!("{}/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_create_missing_title() {
    let response = client()
        .post(format!("{}/", BASE_URL))
        .form(&[("author", "Herbert")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Title is required"));
}

#[tokio::test]
#[ignore]
async fn test_delete_unknown_book() {
    let response = client()
        .post(format!("{}/999999/delete", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
