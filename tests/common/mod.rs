//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use exhibition_constructor::api::ApiClient;
use exhibition_constructor::config::{ApiConfig, Config};
use exhibition_constructor::persistence::ExhibitionPublisher;
use exhibition_constructor::session::{FileSessionStore, Session};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

use mock_backend::MockBackend;

pub const TOKEN: &str = "test-token";

/// Config pointing at the mock backend with short timeouts.
pub fn config_for(backend: &MockBackend) -> Config {
    Config {
        api: ApiConfig {
            base_url: backend.base_url(),
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
        },
        ..Config::default()
    }
}

pub fn client_for(backend: &MockBackend) -> ApiClient {
    ApiClient::new(&config_for(backend).api).expect("client")
}

pub fn logged_in_session() -> Session {
    let session = Session::in_memory();
    session.set_token(TOKEN).unwrap();
    session
}

pub fn publisher_for(backend: &MockBackend, session: Session) -> ExhibitionPublisher {
    ExhibitionPublisher::new(client_for(backend), session, &config_for(backend))
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Temp dir with a config for `backend` and a logged-in session file, for
/// running the binary.
pub fn cli_workspace(backend: &MockBackend) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session_path = dir.path().join("session.json");
    let session = Session::new(Arc::new(FileSessionStore::open(&session_path).unwrap()));
    session.set_token(TOKEN).unwrap();

    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "[api]\nbase_url = {:?}\n\n[session]\npath = {:?}\n",
            backend.base_url(),
            session_path.to_string_lossy()
        ),
    )
    .expect("Failed to write config");
    (dir, config)
}

/// Run the binary off the runtime thread so the mock backend keeps serving.
pub async fn run_binary(args: Vec<OsString>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_exhibition-constructor"));
    cmd.args(args);
    tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .expect("Failed to execute command")
}

// -- Backend payloads ---------------------------------------------------------

pub fn exhibition_json(id: Uuid, title: &str) -> Value {
    json!({ "id": id, "title": title, "blocks": [] })
}

pub fn block_json(kind: &str, position: usize) -> Value {
    json!({ "id": Uuid::new_v4(), "type": kind, "position": position, "items": [] })
}

pub fn upload_json(key: &str) -> Value {
    json!({ "object_key": key })
}
