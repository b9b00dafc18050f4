//! Edits that can be dispatched to the exhibition constructor.

use uuid::Uuid;

use crate::model::{BlockId, BlockInit, BlockKind, BlockPatch, Document, ImageRef, MetadataPatch};
use crate::ui::mvi::Intent;

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    /// Shallow-merge exhibition metadata.
    UpdateMetadata(MetadataPatch),

    /// Append a new block. The id is chosen by the dispatcher so the reducer
    /// stays deterministic.
    AddBlock {
        id: BlockId,
        kind: BlockKind,
        init: BlockInit,
    },

    /// Merge fields into a block. Unknown ids are ignored.
    UpdateBlock { id: BlockId, patch: BlockPatch },

    RemoveBlock { id: BlockId },

    /// Swap a block with its neighbour. No-op at the list boundary.
    MoveBlock {
        id: BlockId,
        direction: MoveDirection,
    },

    /// Drag-and-drop: reinsert a block at `index`.
    MoveBlockToPosition { id: BlockId, index: usize },

    /// Set the image of an item slot, creating the slot if needed.
    AttachImage {
        block_id: BlockId,
        item_index: usize,
        image: ImageRef,
    },

    /// Clear the image of an item slot.
    DetachImage { block_id: BlockId, item_index: usize },

    /// Record the backend id after the first successful save.
    MarkCreated { id: Uuid },

    /// Install a document loaded from the backend.
    Replace(Document),
}

impl Intent for EditorIntent {}
