//! Progress events of an exhibition save.

use uuid::Uuid;

use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum SaveIntent {
    /// Save requested. Ignored while another save is in flight.
    Start { has_staged_cover: bool },

    CoverUploaded,

    ExhibitionCreated {
        exhibition_id: Uuid,
        total_blocks: usize,
    },

    /// The current block reached the backend.
    BlockCreated,

    /// The current step failed.
    Failed { message: String },

    /// Back to idle (e.g. after the user dismissed the result).
    Reset,
}

impl Intent for SaveIntent {}
