//! Exhibition constructor: editing state for a single document.
//!
//! Uses MVI:
//! - `state.rs` - the document snapshot
//! - `intent.rs` - edits
//! - `reducer.rs` - pure state transitions
//! - `editor.rs` - id generation and the current snapshot

mod editor;
mod intent;
mod reducer;
mod state;

pub use editor::DocumentEditor;
pub use intent::{EditorIntent, MoveDirection};
pub use reducer::EditorReducer;
pub use state::EditorState;
