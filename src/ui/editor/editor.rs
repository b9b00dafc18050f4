//! Stateful front for the editor reducer.

use tracing::debug;
use uuid::Uuid;

use crate::model::{
    BlockId, BlockInit, BlockKind, BlockPatch, Document, ImageRef, MetadataPatch,
};
use crate::ui::mvi::Reducer;

use super::intent::{EditorIntent, MoveDirection};
use super::reducer::EditorReducer;
use super::state::EditorState;

/// Holds the current editor snapshot and applies intents to it.
///
/// Ids for new blocks are generated here so the reducer itself stays pure.
#[derive(Debug, Default)]
pub struct DocumentEditor {
    state: EditorState,
}

impl DocumentEditor {
    /// Editor for a new, empty exhibition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor for a document hydrated from the backend.
    pub fn from_document(document: Document) -> Self {
        let mut editor = Self::new();
        editor.dispatch(EditorIntent::Replace(document));
        editor
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn into_document(self) -> Document {
        self.state.document
    }

    /// Apply one intent, replacing the snapshot as a whole.
    pub fn dispatch(&mut self, intent: EditorIntent) {
        debug!(?intent, "editor intent");
        let state = std::mem::take(&mut self.state);
        self.state = EditorReducer::reduce(state, intent);
    }

    pub fn update_metadata(&mut self, patch: MetadataPatch) {
        self.dispatch(EditorIntent::UpdateMetadata(patch));
    }

    /// Append a block and return its fresh id.
    pub fn add_block(&mut self, kind: BlockKind, init: BlockInit) -> BlockId {
        let id = BlockId::generate();
        self.dispatch(EditorIntent::AddBlock {
            id: id.clone(),
            kind,
            init,
        });
        id
    }

    pub fn update_block(&mut self, id: &BlockId, patch: BlockPatch) {
        self.dispatch(EditorIntent::UpdateBlock {
            id: id.clone(),
            patch,
        });
    }

    pub fn remove_block(&mut self, id: &BlockId) {
        self.dispatch(EditorIntent::RemoveBlock { id: id.clone() });
    }

    pub fn move_block(&mut self, id: &BlockId, direction: MoveDirection) {
        self.dispatch(EditorIntent::MoveBlock {
            id: id.clone(),
            direction,
        });
    }

    pub fn move_block_to_position(&mut self, id: &BlockId, index: usize) {
        self.dispatch(EditorIntent::MoveBlockToPosition {
            id: id.clone(),
            index,
        });
    }

    pub fn attach_image(&mut self, block_id: &BlockId, item_index: usize, image: ImageRef) {
        self.dispatch(EditorIntent::AttachImage {
            block_id: block_id.clone(),
            item_index,
            image,
        });
    }

    pub fn detach_image(&mut self, block_id: &BlockId, item_index: usize) {
        self.dispatch(EditorIntent::DetachImage {
            block_id: block_id.clone(),
            item_index,
        });
    }

    pub fn mark_created(&mut self, id: Uuid) {
        self.dispatch(EditorIntent::MarkCreated { id });
    }
}
