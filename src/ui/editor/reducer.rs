//! Reducer for exhibition edits.
//!
//! Every structural change (add, remove, move) ends with a full renumber so
//! `block.position` always equals the block's index.

use crate::model::create_block;
use crate::ui::mvi::Reducer;

use super::intent::{EditorIntent, MoveDirection};
use super::state::EditorState;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let EditorState { mut document } = state;

        match intent {
            EditorIntent::UpdateMetadata(patch) => document.apply_metadata(patch),

            EditorIntent::AddBlock { id, kind, init } => {
                let position = document.blocks.len();
                document.blocks.push(create_block(id, kind, position, init));
            }

            EditorIntent::UpdateBlock { id, patch } => {
                // A missing id means the block was removed in the meantime.
                if let Some(block) = document.block_mut(&id) {
                    block.apply(patch);
                }
            }

            EditorIntent::RemoveBlock { id } => {
                document.blocks.retain(|block| block.id != id);
                document.renumber();
            }

            EditorIntent::MoveBlock { id, direction } => {
                if let Some(index) = document.block_index(&id) {
                    let target = match direction {
                        MoveDirection::Up => index.checked_sub(1),
                        MoveDirection::Down => {
                            (index + 1 < document.blocks.len()).then_some(index + 1)
                        }
                    };
                    if let Some(target) = target {
                        document.blocks.swap(index, target);
                        document.renumber();
                    }
                }
            }

            EditorIntent::MoveBlockToPosition { id, index } => {
                if let Some(from) = document.block_index(&id) {
                    let to = index.min(document.blocks.len() - 1);
                    if from != to {
                        let block = document.blocks.remove(from);
                        document.blocks.insert(to, block);
                        document.renumber();
                    }
                }
            }

            EditorIntent::AttachImage {
                block_id,
                item_index,
                image,
            } => {
                if let Some(block) = document.block_mut(&block_id) {
                    block.item_slot_mut(item_index).image = Some(image);
                }
            }

            EditorIntent::DetachImage {
                block_id,
                item_index,
            } => {
                if let Some(block) = document.block_mut(&block_id) {
                    block.item_slot_mut(item_index).image = None;
                }
            }

            EditorIntent::MarkCreated { id } => document.id = Some(id),

            EditorIntent::Replace(replacement) => {
                document = replacement;
                document.renumber();
            }
        }

        EditorState { document }
    }
}
