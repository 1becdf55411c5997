//! API integration tests
//!
//! Each test builds the full router with a freshly seeded catalog and
//! drives it in-process, so the suite needs no running server.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use book_catalog_server::{api, repository::Repository, services::Services, AppConfig, AppState};

/// Build the application router over a freshly seeded catalog
fn app() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Repository::new())),
    };
    api::create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response body")
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_all_books() {
    let app = app();
    let (status, body) = get(&app, "/api/books").await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 15);
    assert_eq!(all[0]["id"], 1);
    assert_eq!(all[0]["title"], "Spring Boot in Action");
    assert_eq!(all[14]["title"], "Automate the Boring Stuff");
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/books",
        json!({"title": "The Rust Programming Language", "author": "Steve Klabnik", "price": 31.99}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 16);
    assert_eq!(all[15]["id"], 16);

    let (status, book) = get(&app, "/api/books/16").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "The Rust Programming Language");
    assert_eq!(book["author"], "Steve Klabnik");
    assert_eq!(book["price"], 31.99);
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/books",
        json!({"id": 999, "title": "x", "author": "y", "price": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap()[15]["id"], 16);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = app();
    let (status, body) = get(&app, "/api/books/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_delete_then_get() {
    let app = app();
    let (status, removed) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/books/3")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["title"], "Clean Code");

    let (status, _) = get(&app, "/api/books/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/api/books").await;
    assert_eq!(body.as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() {
    let app = app();
    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/books/999")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_changes_only_given_fields() {
    let app = app();
    let (status, book) = send_json(&app, "PATCH", "/api/books/3", json!({"price": 10.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Clean Code");
    assert_eq!(book["author"], "Robert Martin");
    assert_eq!(book["price"], 10.0);
}

#[tokio::test]
async fn test_patch_unknown_id_is_404() {
    let app = app();
    let (status, _) = send_json(&app, "PATCH", "/api/books/999", json!({"price": 10.0})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_and_path_id_wins() {
    let app = app();
    let (status, book) = send_json(
        &app,
        "PUT",
        "/api/books/3",
        json!({"id": 777, "title": "New Title", "author": "New Author", "price": 19.99}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["id"], 3);
    assert_eq!(book["title"], "New Title");
    assert_eq!(book["author"], "New Author");
    assert_eq!(book["price"], 19.99);

    // Replacement happened in place, not at the end
    let (_, all) = get(&app, "/api/books").await;
    assert_eq!(all.as_array().unwrap()[2]["title"], "New Title");
}

#[tokio::test]
async fn test_update_unknown_id_is_404_not_upsert() {
    let app = app();
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/books/999",
        json!({"title": "x", "author": "y", "price": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = get(&app, "/api/books").await;
    assert_eq!(all.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_search_empty_returns_whole_catalog() {
    let app = app();
    let (status, body) = get(&app, "/api/books/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 15);
    assert_eq!(body.as_array().unwrap()[0]["id"], 1);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = app();
    let (status, body) = get(&app, "/api/books/search?title=CLEAN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Clean Code", "Clean Architecture"]);
}

#[tokio::test]
async fn test_price_range_scenario() {
    let app = app();
    let (status, body) = get(&app, "/api/books/price-range?minPrice=40&maxPrice=50").await;
    assert_eq!(status, StatusCode::OK);
    let found = titles(&body);
    assert!(found.contains(&"Clean Code"));
    assert!(found.contains(&"Java Concurrency in Practice"));
    assert!(!found.contains(&"Clean Architecture"));
}

#[tokio::test]
async fn test_price_range_optional_bounds() {
    let app = app();
    let (_, min_only) = get(&app, "/api/books/price-range?minPrice=47.5").await;
    assert_eq!(min_only.as_array().unwrap().len(), 3);

    let (_, max_only) = get(&app, "/api/books/price-range?maxPrice=30").await;
    assert_eq!(max_only.as_array().unwrap().len(), 2);

    let (_, all) = get(&app, "/api/books/price-range").await;
    assert_eq!(all.as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn test_sorted_bogus_key_falls_back_to_title() {
    let app = app();
    let (_, bogus) = get(&app, "/api/books/sorted?sortBy=bogus-key").await;
    let (_, by_title) = get(&app, "/api/books/sorted?sortBy=title").await;
    assert_eq!(bogus, by_title);
    assert_eq!(titles(&bogus)[0], "Automate the Boring Stuff");
}

#[tokio::test]
async fn test_sorted_author_desc() {
    let app = app();
    let (status, body) = get(&app, "/api/books/sorted?sortBy=author&order=desc").await;
    assert_eq!(status, StatusCode::OK);
    let authors: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["author"].as_str().unwrap())
        .collect();
    assert_eq!(authors[0], "Robert Martin");
    let martin = authors.iter().position(|a| *a == "Robert Martin").unwrap();
    let haverbeke = authors
        .iter()
        .position(|a| *a == "Marijn Haverbeke")
        .unwrap();
    assert!(martin < haverbeke);
}

#[tokio::test]
async fn test_sorted_desc_reverses_asc() {
    let app = app();
    let (_, asc) = get(&app, "/api/books/sorted?order=asc").await;
    let (_, desc) = get(&app, "/api/books/sorted?order=desc").await;
    let mut reversed = titles(&desc);
    reversed.reverse();
    assert_eq!(titles(&asc), reversed);
}

#[tokio::test]
async fn test_pagination_first_page() {
    let app = app();
    let (status, body) = get(&app, "/api/books/pagination/0/5").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_pagination_out_of_range_is_empty() {
    let app = app();
    let (status, body) = get(&app, "/api/books/pagination/99/5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_advanced_filter_sort_paginate() {
    let app = app();
    let (status, body) = get(
        &app,
        "/api/books/advanced/0/2?title=java&sortBy=title&order=asc",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Effective Java", "Eloquent JavaScript"]);

    // Second page of the same query
    let (_, body) = get(&app, "/api/books/advanced/1/2?title=java").await;
    assert_eq!(
        titles(&body),
        vec!["Head First Java", "Java Concurrency in Practice"]
    );
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_failed_request_leaves_catalog_intact() {
    let app = app();
    let (status, _) = get(&app, "/api/books/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 15);
}
