//! Loading exhibitions from the mock backend.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{client_for, TOKEN};
use exhibition_constructor::api::ApiError;
use exhibition_constructor::model::{BlockKind, ImageRef};
use exhibition_constructor::persistence::load_exhibition;
use exhibition_constructor::session::SecureString;
use exhibition_constructor::ui::render::{render_document, to_plain_text, RenderMode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn load_orders_blocks_and_resolves_images() {
    let backend = MockBackend::start().await;
    let id = Uuid::new_v4();
    backend
        .enqueue_json(json!({
            "id": id,
            "title": "Bronze Age",
            "description": "Tools and weapons",
            "cover_image_key": "exhibitions/cover.png",
            "tags": ["archaeology"],
            "blocks": [
                {"type": "TEXT", "content": "third", "position": 2},
                {"type": "HEADER", "content": "first", "position": 0},
                {"type": "IMAGE_UPLOAD", "position": 1,
                 "items": [{"position": 0, "image_key": "exhibitions/axe.png"}]}
            ]
        }))
        .await;

    let client = client_for(&backend);
    let document = load_exhibition(&client, id, &SecureString::new(TOKEN))
        .await
        .unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, format!("/api/v1/exhibitions/{}", id));

    assert_eq!(document.id, Some(id));
    assert_eq!(document.description, "Tools and weapons");
    assert_eq!(
        document.cover.as_ref().map(ImageRef::display_url),
        Some(format!("{}/api/v1/files/exhibitions/cover.png", backend.base_url()).as_str())
    );

    let kinds: Vec<&BlockKind> = document.blocks.iter().map(|b| &b.kind).collect();
    assert_eq!(
        kinds,
        [&BlockKind::Header, &BlockKind::ImageUpload, &BlockKind::Text]
    );
    assert!(document.positions_are_dense());

    let text = to_plain_text(&render_document(&document, RenderMode::ReadOnly));
    assert!(text.starts_with("first"));
    assert!(text.contains("exhibitions/axe.png"));
    assert!(text.ends_with("third"));
}

#[tokio::test]
async fn missing_exhibition_is_a_status_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(404, "Exhibition not found"))
        .await;

    let client = client_for(&backend);
    let err = load_exhibition(&client, Uuid::new_v4(), &SecureString::new(TOKEN))
        .await
        .unwrap_err();

    match &err {
        ApiError::Status {
            status, message, ..
        } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "Exhibition not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(
        err.user_message("load the exhibition"),
        "Could not load the exhibition. Please try again."
    );
}
