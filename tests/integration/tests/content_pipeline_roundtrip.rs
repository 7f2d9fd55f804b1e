use httpmock::prelude::*;
use serde_json::json;

use lens_core::date_range::DateInput;
use lens_core::ContentCache;
use lens_notion::{NotionClient, NotionConfig, NotionSerializer, SerializeError};

fn input(raw: &str) -> DateInput {
    DateInput::parse(raw).expect("valid test date")
}

fn serializer(base: String, cache_dir: &std::path::Path) -> NotionSerializer {
    let client = NotionClient::new(NotionConfig {
        api_base: base,
        api_key: "integration-token".to_string(),
        request_timeout_ms: 5_000,
    })
    .expect("client builds");
    NotionSerializer::new(client, "journal-db").with_cache(ContentCache::new(cache_dir))
}

async fn mock_journal(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/databases/journal-db/query")
                .body_excludes("start_cursor");
            then.status(200).json_body(json!({
                "object": "list",
                "results": [
                    {
                        "object": "page",
                        "id": "entry-1",
                        "properties": {
                            "Date": { "type": "date", "date": { "start": "2024-09-02" } },
                            "Mood": { "type": "select", "select": { "name": "calm" } },
                            "Title": { "type": "title", "title": [ { "plain_text": "Monday" } ] },
                            "Skipped": { "type": "people", "people": [] }
                        }
                    }
                ],
                "has_more": true,
                "next_cursor": "page-two"
            }));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/databases/journal-db/query")
                .body_includes("\"start_cursor\":\"page-two\"");
            then.status(200).json_body(json!({
                "object": "list",
                "results": [
                    {
                        "object": "page",
                        "id": "entry-2",
                        "properties": {
                            "Title": { "type": "title", "title": [ { "plain_text": "Tuesday" } ] },
                            "Done": { "type": "checkbox", "checkbox": false }
                        }
                    }
                ],
                "has_more": false,
                "next_cursor": null
            }));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/blocks/entry-1/children");
            then.status(200).json_body(json!({
                "results": [
                    { "type": "paragraph", "paragraph": { "rich_text": [
                        { "plain_text": "Read " },
                        { "plain_text": "[an article](https://example.com/a)" }
                    ] } },
                    { "type": "code", "code": { "rich_text": [ { "plain_text": "cargo test" } ], "language": "bash" } }
                ],
                "has_more": false,
                "next_cursor": null
            }));
        })
        .await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/blocks/entry-2/children");
            then.status(200).json_body(json!({
                "results": [
                    { "type": "paragraph", "paragraph": { "rich_text": [ { "plain_text": "Slept early." } ] } }
                ],
                "has_more": false,
                "next_cursor": null
            }));
        })
        .await;
}

#[tokio::test]
async fn pipeline_serializes_trims_and_caches_journal_entries() {
    let server = MockServer::start_async().await;
    mock_journal(&server).await;

    let tempdir = tempfile::tempdir().expect("tempdir");
    let serializer = serializer(server.base_url(), tempdir.path());

    let contents = serializer
        .get_contents(Some(input("2024-09-01")), Some(input("2024-09-30")), false)
        .await
        .expect("pipeline serializes");

    let expected = "Title: Monday Date: 2024-09-02 Mood: calm\n\
                    Read [link]\n[code]\n---\n\
                    Title: Tuesday Done: No\nSlept early.\n---\n";
    assert_eq!(contents, expected);

    // The cache entry carries the exact serialized text.
    let cached: Vec<_> = std::fs::read_dir(tempdir.path())
        .expect("cache dir exists")
        .flatten()
        .collect();
    assert_eq!(cached.len(), 1);
    let cached_text = std::fs::read_to_string(cached[0].path()).expect("cache entry reads");
    assert_eq!(cached_text, expected);
}

#[tokio::test]
async fn pipeline_prefers_cache_until_forced() {
    let server = MockServer::start_async().await;
    mock_journal(&server).await;

    let tempdir = tempfile::tempdir().expect("tempdir");
    let serializer = serializer(server.base_url(), tempdir.path());

    let fresh = serializer
        .get_contents(Some(input("2024-09-01")), Some(input("2024-09-30")), false)
        .await
        .expect("first run");

    // Tamper with the cache entry to prove the second run reads it.
    let entry = std::fs::read_dir(tempdir.path())
        .expect("cache dir exists")
        .flatten()
        .next()
        .expect("cache entry present");
    std::fs::write(entry.path(), "tampered cache text").expect("tamper");

    let cached = serializer
        .get_contents(Some(input("2024-09-01")), Some(input("2024-09-30")), false)
        .await
        .expect("cached run");
    assert_eq!(cached, "tampered cache text");

    let forced = serializer
        .get_contents(Some(input("2024-09-01")), Some(input("2024-09-30")), true)
        .await
        .expect("forced run");
    assert_eq!(forced, fresh);

    // The forced refresh overwrote the tampered entry.
    let rewritten = std::fs::read_to_string(entry.path()).expect("cache entry reads");
    assert_eq!(rewritten, fresh);
}

#[tokio::test]
async fn pipeline_surfaces_upstream_api_messages() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/databases/journal-db/query");
            then.status(401).json_body(json!({
                "object": "error",
                "status": 401,
                "code": "unauthorized",
                "message": "API token is invalid."
            }));
        })
        .await;

    let tempdir = tempfile::tempdir().expect("tempdir");
    let serializer = serializer(server.base_url(), tempdir.path());

    let error = serializer
        .get_contents(Some(input("2024-09-01")), Some(input("2024-09-30")), false)
        .await
        .expect_err("unauthorized must fail");

    match error {
        SerializeError::Fetch(message) => assert_eq!(message, "API token is invalid."),
        other => panic!("unexpected error: {other}"),
    }
}
