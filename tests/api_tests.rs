//! API integration tests
//!
//! Each test starts the server on a random local port. The MongoDB-backed
//! test needs a reachable server in `DB` and is ignored by default:
//! `DB=mongodb://localhost:27017/library_test cargo test -- --ignored`

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use library_server::{
    api::create_router,
    config::{AppConfig, DatabaseConfig},
    repository::{BookStore, InMemoryBookStore, MongoBookStore},
    AppState,
};

/// Serve the API over `store` and return its base URL
async fn spawn_server(store: Arc<dyn BookStore>) -> String {
    let app = create_router(AppState::new(AppConfig::default(), store));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn text(response: reqwest::Response) -> String {
    assert!(response.status().is_success());
    response.text().await.expect("Failed to read response")
}

/// Walk the whole book lifecycle against a running server
async fn exercise_library(base: &str) {
    let client = Client::new();
    let books = format!("{}/api/books", base);

    // Start from an empty collection
    client.delete(&books).send().await.expect("Failed to send request");

    let response = client.get(&books).send().await.expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));

    // Missing title
    let response = client.post(&books).json(&json!({})).send().await.unwrap();
    assert_eq!(text(response).await, "must provide title");

    // Create
    let response = client
        .post(&books)
        .json(&json!({ "title": "Moby Dick" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["title"], "Moby Dick");
    assert_eq!(created["commentcount"], 0);
    let id = created["_id"].as_str().expect("No book id").to_string();
    let book = format!("{}/{}", books, id);

    // Fetch
    let fetched: Value = client.get(&book).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["_id"], id.as_str());
    assert_eq!(fetched["title"], "Moby Dick");
    assert_eq!(fetched["comments"], json!([]));

    // Comment, once as JSON and once as a form post
    let updated: Value = client
        .post(&book)
        .json(&json!({ "comment": "great book" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["commentcount"], 1);
    assert_eq!(updated["comments"], json!(["great book"]));

    let updated: Value = client
        .post(&book)
        .header("content-type", "application/x-www-form-urlencoded")
        .body("comment=call+me+Ishmael")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["commentcount"], 2);
    assert_eq!(updated["comments"], json!(["great book", "call me Ishmael"]));

    // List shows the summary
    let listed: Value = client.get(&books).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([{ "_id": id, "title": "Moby Dick", "commentcount": 2 }]));

    // Misses
    let missing = format!("{}/5f43a1b2c3d4e5f6a7b8c9d0", books);
    assert_eq!(text(client.get(&missing).send().await.unwrap()).await, "no book exists");
    assert_eq!(
        text(client.get(format!("{}/not-an-id", books)).send().await.unwrap()).await,
        "no book exists"
    );
    let response = client
        .post(&missing)
        .json(&json!({ "comment": "hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(text(response).await, "invalid book id");
    assert_eq!(
        text(client.delete(&missing).send().await.unwrap()).await,
        "could not delete 5f43a1b2c3d4e5f6a7b8c9d0"
    );

    // Delete one, then everything
    assert_eq!(text(client.delete(&book).send().await.unwrap()).await, "delete successful");
    assert_eq!(text(client.get(&book).send().await.unwrap()).await, "no book exists");

    client.post(&books).json(&json!({ "title": "Dune" })).send().await.unwrap();
    assert_eq!(
        text(client.delete(&books).send().await.unwrap()).await,
        "complete delete successful"
    );
    assert_eq!(text(client.delete(&books).send().await.unwrap()).await, "no books deleted");

    // Anything else
    let response = client.get(format!("{}/api/authors", base)).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Not Found");
}

#[tokio::test]
async fn test_library_lifecycle_in_memory() {
    let base = spawn_server(Arc::new(InMemoryBookStore::new())).await;
    exercise_library(&base).await;
}

#[tokio::test]
async fn test_concurrent_comments_keep_count() {
    let base = spawn_server(Arc::new(InMemoryBookStore::new())).await;
    let client = Client::new();

    let created: Value = client
        .post(format!("{}/api/books", base))
        .json(&json!({ "title": "Dune" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let book = format!("{}/api/books/{}", base, created["_id"].as_str().unwrap());

    let posts = (0..20).map(|n| {
        let client = client.clone();
        let book = book.clone();
        tokio::spawn(async move {
            client
                .post(&book)
                .json(&json!({ "comment": format!("comment {}", n) }))
                .send()
                .await
                .unwrap();
        })
    });
    for post in posts.collect::<Vec<_>>() {
        post.await.unwrap();
    }

    let fetched: Value = client.get(&book).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["commentcount"], 20);
    assert_eq!(fetched["comments"].as_array().unwrap().len(), 20);
}

#[tokio::test]
#[ignore] // Run with: DB=mongodb://... cargo test -- --ignored
async fn test_library_lifecycle_mongodb() {
    let url = std::env::var("DB").expect("DB must hold a MongoDB connection string");
    let config = DatabaseConfig {
        url,
        collection: "library_api_tests".to_string(),
        ..DatabaseConfig::default()
    };
    let store = MongoBookStore::connect(&config)
        .await
        .expect("Failed to connect to MongoDB");

    let base = spawn_server(Arc::new(store)).await;
    exercise_library(&base).await;
}
