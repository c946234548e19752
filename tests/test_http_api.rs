//! End-to-end flow against a spawned API server:
//! 1) Ingest a book into the global catalog over HTTP.
//! 2) Copy it into the user catalog, record progress, query top/last-read.
//! 3) Remove it again, checking the status code for every error kind.

use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;

use bookrack::transport;

async fn spawn_server(dir: &TempDir) -> String {
    let state = transport::http::AppState::new(
        dir.path().join("data.json"),
        dir.path().join("user_library/user_library.json"),
    );
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Wait for the server to accept connections.
    for _ in 0..30 {
        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => break,
            Err(_) => tokio::time::sleep(tokio::time::Duration::from_millis(50)).await,
        }
    }
    format!("http://{addr}")
}

fn book_payload(author: &str, title: &str, pages: u32) -> JsonValue {
    json!({
        "author": author,
        "country": "United States",
        "imageLink": "images/placeholder.jpg",
        "language": "English",
        "link": "https://example.org/books",
        "pages": pages,
        "title": title,
        "year": 1925,
        "last_read_page": 0,
        "percentage_read": 0.0,
        "last_read_date": null
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_reading_flow() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let base_url = spawn_server(&dir).await;
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // Fresh deployment: healthy, both catalogs empty.
    let health = client
        .get(format!("{base_url}/health"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert!(health["success"].as_bool().unwrap_or(false));
    assert_eq!(health["data"]["global_books"], 0);

    let listed = client
        .get(format!("{base_url}/user/books"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert!(listed["success"].as_bool().unwrap_or(false));
    assert_eq!(listed["data"]["books"], json!([]));

    // Ingest into the global catalog; the server mints the identity.
    let created = client
        .post(format!("{base_url}/global/books"))
        .json(&book_payload("F. Scott Fitzgerald", "The Great Gatsby", 180))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert!(created["success"].as_bool().unwrap_or(false));
    let uuid = created["data"]["book"]["uuid"].as_str().unwrap().to_string();

    // Substring search finds it; a projected search narrows it down.
    let found = client
        .get(format!("{base_url}/global/books/search/title/Gatsby"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert_eq!(found["data"]["books"][0]["uuid"].as_str().unwrap(), uuid);

    let projected = client
        .get(format!("{base_url}/global/books/search/author/Fitzgerald/title"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert_eq!(
        projected["data"]["books"],
        json!([{"title": "The Great Gatsby"}])
    );

    // Copy into the user catalog; the identity is carried over.
    let copied = client
        .post(format!("{base_url}/user/books/{uuid}"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert!(copied["success"].as_bool().unwrap_or(false));
    assert_eq!(copied["data"]["book"]["uuid"].as_str().unwrap(), uuid);

    // A second copy conflicts.
    let duplicate = client.post(format!("{base_url}/user/books/{uuid}")).send().await?;
    assert_eq!(duplicate.status().as_u16(), 409);

    // Record progress: 90 of 180 pages read.
    let updated = client
        .patch(format!("{base_url}/user/books/{uuid}/page/90"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert!(updated["success"].as_bool().unwrap_or(false));
    assert_eq!(updated["data"]["book"]["last_read_page"], 90);
    assert_eq!(updated["data"]["book"]["percentage_read"].as_f64().unwrap(), 50.0);

    // The convenience query agrees with top-by-attribute.
    let last_read = client
        .get(format!("{base_url}/user/books/last-read"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert_eq!(last_read["data"]["book"]["uuid"].as_str().unwrap(), uuid);

    let top = client
        .get(format!("{base_url}/user/books/top/pages"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert_eq!(top["data"]["book"]["uuid"].as_str().unwrap(), uuid);

    // Remove; a second attempt is a miss.
    let removed = client
        .delete(format!("{base_url}/user/books/{uuid}"))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    assert!(removed["success"].as_bool().unwrap_or(false));
    assert_eq!(removed["data"]["book"]["uuid"].as_str().unwrap(), uuid);

    let missing = client.delete(format!("{base_url}/user/books/{uuid}")).send().await?;
    assert_eq!(missing.status().as_u16(), 404);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_error_kinds_map_onto_status_codes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let base_url = spawn_server(&dir).await;
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // Key outside the allow-list → 400.
    let bad_key = client
        .get(format!("{base_url}/global/books/search/isbn/1"))
        .send()
        .await?;
    assert_eq!(bad_key.status().as_u16(), 400);

    // Search miss → 404.
    let miss = client
        .get(format!("{base_url}/global/books/search/title/zzz-no-match"))
        .send()
        .await?;
    assert_eq!(miss.status().as_u16(), 404);

    // Record shape violation → 400, naming the missing key.
    let mut payload = book_payload("Harper Lee", "To Kill a Mockingbird", 281);
    payload.as_object_mut().unwrap().remove("title");
    let bad_shape = client
        .post(format!("{base_url}/global/books"))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(bad_shape.status().as_u16(), 400);
    let body = bad_shape.json::<JsonValue>().await?;
    assert!(body["error"].as_str().unwrap().contains("title"));

    // Unparseable body → 422.
    let unparseable = client
        .post(format!("{base_url}/global/books"))
        .header("content-type", "application/json")
        .body("definitely not json")
        .send()
        .await?;
    assert_eq!(unparseable.status().as_u16(), 422);

    // Page updates: non-integer segment, out-of-range page, unknown uuid.
    let created = client
        .post(format!("{base_url}/global/books"))
        .json(&book_payload("Harper Lee", "To Kill a Mockingbird", 281))
        .send()
        .await?
        .json::<JsonValue>()
        .await?;
    let uuid = created["data"]["book"]["uuid"].as_str().unwrap().to_string();
    client
        .post(format!("{base_url}/user/books/{uuid}"))
        .send()
        .await?
        .error_for_status()?;

    let not_an_int = client
        .patch(format!("{base_url}/user/books/{uuid}/page/ninety"))
        .send()
        .await?;
    assert_eq!(not_an_int.status().as_u16(), 400);
    let body = not_an_int.json::<JsonValue>().await?;
    assert_eq!(body["error"].as_str().unwrap(), "Page number must be an integer.");

    let beyond = client
        .patch(format!("{base_url}/user/books/{uuid}/page/282"))
        .send()
        .await?;
    assert_eq!(beyond.status().as_u16(), 400);

    let unknown = client
        .patch(format!("{base_url}/user/books/no-such-identity/page/5"))
        .send()
        .await?;
    assert_eq!(unknown.status().as_u16(), 404);

    // Top-book: attribute nobody carries → 400; empty library → 404.
    let unread = client
        .get(format!("{base_url}/user/books/top/genre"))
        .send()
        .await?;
    assert_eq!(unread.status().as_u16(), 400);

    client
        .delete(format!("{base_url}/user/books/{uuid}"))
        .send()
        .await?
        .error_for_status()?;
    let empty = client
        .get(format!("{base_url}/user/books/top/pages"))
        .send()
        .await?;
    assert_eq!(empty.status().as_u16(), 404);

    Ok(())
}
