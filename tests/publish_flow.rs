//! Saving documents against the mock backend.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{
    block_json, cli_workspace, exhibition_json, logged_in_session, publisher_for, run_binary,
    upload_json, TOKEN,
};
use exhibition_constructor::model::{BlockInit, BlockKind, ImageRef, MetadataPatch, StagedImage};
use exhibition_constructor::persistence::progress::SaveState;
use exhibition_constructor::persistence::{SaveError, SaveOutcome};
use exhibition_constructor::session::Session;
use exhibition_constructor::ui::editor::DocumentEditor;
use serde_json::json;
use std::path::Path;
use std::process::Output;
use uuid::Uuid;

fn titled(title: &str) -> DocumentEditor {
    let mut editor = DocumentEditor::new();
    editor.update_metadata(MetadataPatch::title(title));
    editor
}

fn png() -> ImageRef {
    ImageRef::Staged(StagedImage::from_bytes(b"\x89PNG", "image/png"))
}

#[tokio::test]
async fn text_block_creates_exhibition_then_block() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(exhibition_json(id, "Bronze Age")).await;
    backend.enqueue_json(block_json("TEXT", 0)).await;

    let mut editor = titled("Bronze Age");
    editor.add_block(BlockKind::Text, BlockInit::with_content("hello"));

    let publisher = publisher_for(&backend, logged_in_session());
    let outcome = publisher.save(editor.document()).await.unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            exhibition_id: id,
            blocks_created: 1
        }
    );
    assert_eq!(
        publisher.state(),
        SaveState::Done {
            exhibition_id: id,
            blocks_created: 1
        }
    );

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 2);

    let create = &requests[0];
    assert_eq!(create.method, "POST");
    assert_eq!(create.path, "/api/v1/exhibitions/");
    assert_eq!(
        create.header("authorization"),
        Some(format!("Bearer {}", TOKEN).as_str())
    );
    let body = create.json();
    assert_eq!(body["title"], "Bronze Age");
    assert_eq!(body["status"], "draft");
    assert_eq!(body["cover_type"], "outside");
    assert_eq!(body["date_template"], "year");
    assert_eq!(body["cover_image_key"], json!(null));

    let block = &requests[1];
    assert_eq!(block.path, format!("/api/v1/exhibitions/{}/blocks/", id));
    assert_eq!(
        block.json(),
        json!({
            "type": "TEXT",
            "content": "hello",
            "settings": {},
            "position": 0,
            "items": []
        })
    );
}

#[tokio::test]
async fn staged_images_upload_before_their_create_call() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(upload_json("exhibitions/cover.png")).await;
    backend.enqueue_json(exhibition_json(id, "Show")).await;
    backend.enqueue_json(upload_json("exhibitions/item.png")).await;
    backend.enqueue_json(block_json("IMAGE_UPLOAD", 0)).await;

    let mut editor = titled("Show");
    editor.update_metadata(MetadataPatch {
        cover: Some(Some(png())),
        ..MetadataPatch::default()
    });
    let block = editor.add_block(BlockKind::ImageUpload, BlockInit::default());
    editor.attach_image(&block, 0, png());

    let outcome = publisher_for(&backend, logged_in_session())
        .save(editor.document())
        .await
        .unwrap();
    assert!(matches!(outcome, SaveOutcome::Saved { blocks_created: 1, .. }));

    let requests = backend.captured_requests().await;
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "/api/v1/files/upload".to_string(),
            "/api/v1/exhibitions/".to_string(),
            "/api/v1/files/upload".to_string(),
            format!("/api/v1/exhibitions/{}/blocks/", id),
        ]
    );

    let upload = &requests[0];
    assert_eq!(upload.query.as_deref(), Some("prefix=exhibitions"));
    assert!(upload
        .header("content-type")
        .is_some_and(|ct| ct.starts_with("multipart/form-data")));
    assert!(upload.body_text().contains("filename=\"cover.png\""));

    assert_eq!(requests[1].json()["cover_image_key"], "exhibitions/cover.png");
    assert_eq!(
        requests[3].json()["items"],
        json!([{ "position": 0, "text": null, "image_key": "exhibitions/item.png" }])
    );
}

#[tokio::test]
async fn remote_images_are_not_uploaded_again() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(exhibition_json(id, "Show")).await;
    backend.enqueue_json(block_json("IMAGES_GRID_2", 0)).await;

    let mut editor = titled("Show");
    let block = editor.add_block(BlockKind::ImagesGrid2, BlockInit::default());
    editor.attach_image(
        &block,
        1,
        ImageRef::remote(&backend.base_url(), "exhibitions/old.png"),
    );

    publisher_for(&backend, logged_in_session())
        .save(editor.document())
        .await
        .unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].json()["items"],
        json!([
            { "position": 0, "text": null, "image_key": null },
            { "position": 1, "text": null, "image_key": "exhibitions/old.png" }
        ])
    );
}

#[tokio::test]
async fn blocks_are_created_in_position_order() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(exhibition_json(id, "Show")).await;
    for (position, kind) in ["QUOTE", "HEADER", "TEXT"].iter().enumerate() {
        backend.enqueue_json(block_json(kind, position)).await;
    }

    let mut editor = titled("Show");
    let header = editor.add_block(BlockKind::Header, BlockInit::with_content("h"));
    editor.add_block(BlockKind::Text, BlockInit::with_content("t"));
    let quote = editor.add_block(BlockKind::Quote, BlockInit::with_content("q"));
    editor.move_block_to_position(&quote, 0);
    assert_eq!(editor.document().block_index(&header), Some(1));

    publisher_for(&backend, logged_in_session())
        .save(editor.document())
        .await
        .unwrap();

    let requests = backend.captured_requests().await;
    let blocks: Vec<(String, u64)> = requests[1..]
        .iter()
        .map(|r| {
            let body = r.json();
            (
                body["type"].as_str().unwrap().to_string(),
                body["position"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        blocks,
        [
            ("QUOTE".to_string(), 0),
            ("HEADER".to_string(), 1),
            ("TEXT".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn selected_organization_is_sent() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(exhibition_json(id, "Show")).await;

    let session = logged_in_session();
    session.select_organization("org-42").unwrap();

    let outcome = publisher_for(&backend, session)
        .save(titled("Show").document())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            exhibition_id: id,
            blocks_created: 0
        }
    );

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].json()["organization_id"], "org-42");
}

#[tokio::test]
async fn second_save_while_saving_is_skipped() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend
        .enqueue_response(MockResponse::json(exhibition_json(id, "Show")).with_delay(200))
        .await;

    let publisher = publisher_for(&backend, logged_in_session());
    let editor = titled("Show");

    let (first, second) = tokio::join!(
        publisher.save(editor.document()),
        publisher.save(editor.document())
    );

    assert!(matches!(first, Ok(SaveOutcome::Saved { .. })));
    assert_eq!(second.unwrap(), SaveOutcome::Skipped);
    assert_eq!(backend.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn validation_and_auth_fail_without_requests() {
    let backend = MockBackend::start().await;

    let err = publisher_for(&backend, logged_in_session())
        .save(titled("").document())
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Validation(_)));

    let err = publisher_for(&backend, Session::in_memory())
        .save(titled("Show").document())
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Unauthenticated));
    assert_eq!(err.user_message(), "Please log in to save the exhibition.");

    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn block_failure_reports_partial_progress() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(exhibition_json(id, "Show")).await;
    backend.enqueue_json(block_json("TEXT", 0)).await;
    backend
        .enqueue_response(MockResponse::error(500, "database down"))
        .await;

    let mut editor = titled("Show");
    editor.add_block(BlockKind::Text, BlockInit::with_content("one"));
    editor.add_block(BlockKind::Text, BlockInit::with_content("two"));
    editor.add_block(BlockKind::Text, BlockInit::with_content("three"));

    let publisher = publisher_for(&backend, logged_in_session());
    let err = publisher.save(editor.document()).await.unwrap_err();

    match &err {
        SaveError::CreateBlock {
            index,
            exhibition_id,
            blocks_created,
            source,
        } => {
            assert_eq!(*index, 1);
            assert_eq!(*exhibition_id, id);
            assert_eq!(*blocks_created, 1);
            assert_eq!(source.status(), Some(500));
        }
        other => panic!("expected CreateBlock, got {:?}", other),
    }

    let state = publisher.state();
    assert!(state.is_partial());
    assert!(!publisher.is_saving());
    // No further calls after the failure.
    assert_eq!(backend.captured_requests().await.len(), 3);
}

#[tokio::test]
async fn cover_upload_failure_aborts_before_create() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(413, "too large"))
        .await;

    let mut editor = titled("Show");
    editor.update_metadata(MetadataPatch {
        cover: Some(Some(png())),
        ..MetadataPatch::default()
    });

    let err = publisher_for(&backend, logged_in_session())
        .save(editor.document())
        .await
        .unwrap_err();

    assert!(matches!(err, SaveError::CoverUpload(_)));
    assert_eq!(err.exhibition_id(), None);
    assert_eq!(backend.captured_requests().await.len(), 1);
}

// -- Publishing drafts through the binary --------------------------------------

async fn publish_draft(config: &Path, draft: &Path) -> Output {
    run_binary(vec![
        "--config".into(),
        config.into(),
        "exhibitions".into(),
        "publish".into(),
        draft.into(),
    ])
    .await
}

#[tokio::test]
async fn malformed_data_uri_fails_before_any_request() {
    let backend = MockBackend::start().await;
    let (dir, config) = cli_workspace(&backend);
    let draft = dir.path().join("draft.json");
    std::fs::write(
        &draft,
        r#"{
            "title": "Bronze Age",
            "blocks": [
                {"type": "TEXT", "content": "Made of bronze."},
                {"type": "IMAGE_UPLOAD", "items": [
                    {"image": "data:image/png;base64,!!not-base64!!"}
                ]}
            ]
        }"#,
    )
    .unwrap();

    let output = publish_draft(&config, &draft).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid image"), "stderr: {}", stderr);
    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn published_draft_is_not_published_twice() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend.enqueue_json(exhibition_json(id, "Bronze Age")).await;
    backend.enqueue_json(block_json("TEXT", 0)).await;

    let (dir, config) = cli_workspace(&backend);
    let draft = dir.path().join("draft.json");
    std::fs::write(
        &draft,
        r#"{"title": "Bronze Age", "blocks": [{"type": "TEXT", "content": "hello"}]}"#,
    )
    .unwrap();

    let first = publish_draft(&config, &draft).await;
    assert!(first.status.success(), "{:?}", first);
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&draft).unwrap()).unwrap();
    assert_eq!(saved["id"], json!(id.to_string()));
    assert_eq!(saved["blocks"][0]["content"], "hello");

    let second = publish_draft(&config, &draft).await;
    assert_eq!(second.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already been saved"), "stderr: {}", stderr);
    assert_eq!(backend.captured_requests().await.len(), 2);
}
