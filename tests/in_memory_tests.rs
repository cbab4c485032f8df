//! Integration tests for the in-memory store through the HTTP suite,
//! plus seed-file loading.

#[macro_use]
mod api_harness;

use api_harness::*;
use hotels::prelude::*;
use std::io::Write;

async fn memory_store(seed: SeedData) -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::from_seed(seed).unwrap())
}

hotel_api_tests!(memory_store);

// ---------------------------------------------------------------------------
// Seed files
// ---------------------------------------------------------------------------

const SEED_YAML: &str = r#"
users:
  - id: 1
    email: guest@example.com
sessions:
  - userId: 1
    token: demo-token
hotels:
  - id: 7
    name: Driven Resort
    image: https://example.com/resort.png
    createdAt: "2024-05-01T12:00:00.000Z"
    updatedAt: "2024-05-01T12:00:00.000Z"
rooms:
  - name: "101"
    capacity: 2
    hotelId: 7
"#;

#[tokio::test]
async fn test_store_from_seed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SEED_YAML.as_bytes()).unwrap();

    let seed = SeedData::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    let store = InMemoryStore::from_seed(seed).unwrap();

    assert_eq!(store.hotel_count().unwrap(), 1);
    let hotel = store.find_with_rooms(7).await.unwrap().unwrap();
    assert_eq!(hotel.hotel.name, "Driven Resort");
    assert_eq!(hotel.rooms.len(), 1);
    assert_eq!(hotel.rooms[0].id, 1);

    let session = store.find_by_token("demo-token").await.unwrap().unwrap();
    assert_eq!(session.user_id, 1);
}

#[test]
fn test_missing_seed_file_names_path() {
    let err = SeedData::from_yaml_file("/nonexistent/seed.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/seed.yaml"));
}

#[test]
fn test_seed_with_dangling_reference_is_rejected() {
    let seed = SeedData::from_yaml_str(
        r#"
sessions:
  - userId: 3
    token: orphan
"#,
    )
    .unwrap();
    let err = InMemoryStore::from_seed(seed).err().unwrap();
    assert!(err.to_string().contains("unknown user 3"));
}

#[tokio::test]
async fn test_seeded_store_serves_requests() {
    let seed = SeedData::from_yaml_str(SEED_YAML).unwrap();
    let store = Arc::new(InMemoryStore::from_seed(seed).unwrap());
    let router = ServerBuilder::new().with_store(store).build().unwrap();
    let server = axum_test::TestServer::try_new(router).unwrap();

    // guest has a session but never enrolled
    let response = server
        .get("/hotels")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Bearer demo-token"),
        )
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}
