//! HTTP-level tests for the share API: create, list, metadata, raw content,
//! and delete, against a real router and a throwaway SQLite database.

use axum_test::TestServer;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use sketchdrop::config::Config;
use sketchdrop::db::Database;
use sketchdrop::services::processor::{process_files, InputFile};
use sketchdrop::{create_router, AppState};

struct TestApp {
    server: TestServer,
    _temp_dir: TempDir,
}

async fn setup() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let db = Database::new(db_path.to_str().unwrap()).await.unwrap();
    db.run_migrations().await.unwrap();

    let state = AppState {
        db,
        config: Arc::new(Config::default()),
    };
    let server = TestServer::new(create_router(state)).unwrap();

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}

fn file_json(path: &str, bytes: &[u8], mime: &str) -> Value {
    json!({
        "path": path,
        "content": general_purpose::STANDARD.encode(bytes),
        "type": mime,
        "size": bytes.len(),
    })
}

async fn create_share(app: &TestApp, title: &str, files: Vec<Value>) -> String {
    let response = app
        .server
        .post("/api/shares")
        .json(&json!({ "metadata": { "title": title }, "files": files }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_share_reports_aggregates() {
    let app = setup().await;
    let id = create_share(
        &app,
        "Aggregates",
        vec![
            file_json("a.txt", b"aaa", "text/plain"),
            file_json("b.txt", b"bbbbb", "text/plain"),
            file_json("c.bin", b"cc", "application/octet-stream"),
        ],
    )
    .await;

    let meta = app.server.get(&format!("/api/shares/{}", id)).await.json::<Value>();
    assert_eq!(meta["fileCount"], 3);
    assert_eq!(meta["totalSize"], 10);
    let paths: Vec<&str> = meta["filePaths"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    assert_eq!(paths.len(), 3);
    for p in ["a.txt", "b.txt", "c.bin"] {
        assert!(paths.contains(&p));
    }
    assert!(meta.get("files").is_none());
}

#[tokio::test]
async fn index_html_marks_share_as_website() {
    let app = setup().await;
    let id = create_share(
        &app,
        "Site",
        vec![
            file_json("style.css", b"body{}", "text/css"),
            file_json("Index.HTML", b"<html></html>", "text/html"),
        ],
    )
    .await;

    let meta = app.server.get(&format!("/api/shares/{}", id)).await.json::<Value>();
    assert_eq!(meta["isWebsite"], true);
    assert_eq!(meta["mainFile"], "index.html");
}

#[tokio::test]
async fn non_website_uses_first_file_as_main() {
    let app = setup().await;
    let id = create_share(
        &app,
        "Docs",
        vec![
            file_json("report.pdf", b"%PDF-1.4", "application/pdf"),
            file_json("notes.txt", b"notes", "text/plain"),
        ],
    )
    .await;

    let meta = app.server.get(&format!("/api/shares/{}", id)).await.json::<Value>();
    assert_eq!(meta["isWebsite"], false);
    assert_eq!(meta["mainFile"], "report.pdf");
}

#[tokio::test]
async fn content_round_trips_bytes_and_mime() {
    let app = setup().await;
    let payload: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x00, 0xff, 0x7f];
    let id = create_share(&app, "Pixels", vec![file_json("img/logo.png", &payload, "image/png")]).await;

    let response = app
        .server
        .get(&format!("/api/content/{}/img/logo.png", id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), payload.as_slice());
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.header("cache-control"), "public, max-age=3600");
}

#[tokio::test]
async fn content_missing_share_or_path_is_not_found() {
    let app = setup().await;
    let id = create_share(&app, "One", vec![file_json("a.txt", b"a", "text/plain")]).await;

    app.server
        .get("/api/content/nope/a.txt")
        .await
        .assert_status_not_found();
    app.server
        .get(&format!("/api/content/{}/missing.txt", id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn metadata_for_unknown_share_is_not_found() {
    let app = setup().await;
    app.server
        .get("/api/shares/does-not-exist")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn delete_makes_share_unavailable() {
    let app = setup().await;
    let id = create_share(&app, "Gone", vec![file_json("a.txt", b"a", "text/plain")]).await;

    let response = app.server.delete(&format!("/api/shares/{}", id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["deleted"], true);

    app.server
        .get(&format!("/api/shares/{}", id))
        .await
        .assert_status_not_found();
    app.server
        .get(&format!("/api/content/{}/a.txt", id))
        .await
        .assert_status_not_found();
    app.server
        .delete(&format!("/api/shares/{}", id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn list_with_ids_omits_missing_identifiers() {
    let app = setup().await;
    let id = create_share(&app, "Kept", vec![file_json("a.txt", b"a", "text/plain")]).await;

    let page = app
        .server
        .get(&format!("/api/shares?ids={},missing-id", id))
        .await
        .json::<Value>();

    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());
    assert!(page["next"].is_null());
}

#[tokio::test]
async fn list_pages_through_all_shares() {
    let app = setup().await;
    for i in 0..5 {
        let response = app
            .server
            .post("/api/shares")
            .json(&json!({
                "metadata": { "id": format!("share-{}", i), "title": "Paged" },
                "files": [file_json("a.txt", b"a", "text/plain")],
            }))
            .await;
        response.assert_status_ok();
    }

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let url = match &cursor {
            Some(c) => format!("/api/shares?limit=2&cursor={}", c),
            None => "/api/shares?limit=2".to_string(),
        };
        let page = app.server.get(&url).await.json::<Value>();
        for item in page["items"].as_array().unwrap() {
            seen.push(item["id"].as_str().unwrap().to_string());
        }
        match page["next"].as_str() {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(seen.len(), 5);
    for i in 0..5 {
        assert!(seen.contains(&format!("share-{}", i)));
    }
}

#[tokio::test]
async fn empty_file_list_is_rejected_before_any_write() {
    let app = setup().await;
    let response = app
        .server
        .post("/api/shares")
        .json(&json!({ "metadata": { "title": "Empty" }, "files": [] }))
        .await;
    response.assert_status_bad_request();

    // Nothing was persisted.
    let page = app.server.get("/api/shares").await.json::<Value>();
    assert!(page["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn first_file_without_path_is_rejected() {
    let app = setup().await;
    let response = app
        .server
        .post("/api/shares")
        .json(&json!({
            "metadata": {},
            "files": [file_json("", b"x", "text/plain")],
        }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn zip_upload_flows_through_processor_to_share() {
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;

    let mut zip_bytes = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(Cursor::new(&mut zip_bytes));
        writer.add_directory("dir/", FileOptions::default()).unwrap();
        writer.start_file("a.txt", FileOptions::default()).unwrap();
        writer.write_all(b"from the archive").unwrap();
        writer.finish().unwrap();
    }

    let records = process_files(vec![InputFile::new("bundle.zip", zip_bytes)]).unwrap();
    assert_eq!(records.len(), 1);

    let app = setup().await;
    let files: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "path": r.path,
                "content": r.content,
                "type": r.mime_type,
                "size": r.size,
            })
        })
        .collect();
    let id = create_share(&app, "Zipped", files).await;

    let meta = app.server.get(&format!("/api/shares/{}", id)).await.json::<Value>();
    assert_eq!(meta["fileCount"], 1);

    let response = app.server.get(&format!("/api/content/{}/a.txt", id)).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"from the archive");
}

#[tokio::test]
async fn viewer_renders_website_frame_and_not_found_page() {
    let app = setup().await;
    let id = create_share(
        &app,
        "Mini Site",
        vec![file_json("index.html", b"<h1>hi</h1>", "text/html")],
    )
    .await;

    let response = app.server.get(&format!("/view/{}", id)).await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<iframe"));
    assert!(html.contains(&format!("/api/content/{}/index.html", id)));

    let missing = app.server.get("/view/unknown").await;
    missing.assert_status_not_found();
    assert!(missing.text().contains("Sketch Not Found"));
}
