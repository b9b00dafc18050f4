use crate::model::Document;
use crate::ui::mvi::UiState;

/// Snapshot of the constructor: the document being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub document: Document,
}

impl UiState for EditorState {}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn is_empty(&self) -> bool {
        self.document.blocks.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.document.blocks.len()
    }
}
