//! State of an exhibition save.

use uuid::Uuid;

use crate::ui::mvi::UiState;

/// Progress of a save, from the first upload to the last block.
///
/// ```text
/// Idle → UploadingCover → CreatingExhibition → CreatingBlock(i) → Done
///                 └──────────────┴──────────────────┴────────→ Failed
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,

    /// Uploading a staged cover image.
    UploadingCover,

    /// Issuing "create exhibition".
    CreatingExhibition,

    /// Uploading item images of, then creating, block `index` of `total`.
    CreatingBlock {
        exhibition_id: Uuid,
        index: usize,
        total: usize,
    },

    Done {
        exhibition_id: Uuid,
        blocks_created: usize,
    },

    /// The save stopped. When the exhibition had already been created,
    /// `exhibition_id` names it and `blocks_created` says how many blocks
    /// reached the backend; nothing is rolled back.
    Failed {
        message: String,
        exhibition_id: Option<Uuid>,
        blocks_created: usize,
    },
}

impl UiState for SaveState {}

impl SaveState {
    /// A save is in flight; further saves must be ignored.
    pub fn is_saving(&self) -> bool {
        matches!(
            self,
            Self::UploadingCover | Self::CreatingExhibition | Self::CreatingBlock { .. }
        )
    }

    /// Exhibition id once it exists on the backend.
    pub fn exhibition_id(&self) -> Option<Uuid> {
        match self {
            Self::CreatingBlock { exhibition_id, .. } | Self::Done { exhibition_id, .. } => {
                Some(*exhibition_id)
            }
            Self::Failed { exhibition_id, .. } => *exhibition_id,
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True when a save failed after the exhibition was created.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Self::Failed {
                exhibition_id: Some(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_default() {
        assert_eq!(SaveState::default(), SaveState::Idle);
    }

    #[test]
    fn saving_states() {
        let id = Uuid::new_v4();
        assert!(!SaveState::Idle.is_saving());
        assert!(SaveState::UploadingCover.is_saving());
        assert!(SaveState::CreatingExhibition.is_saving());
        assert!(SaveState::CreatingBlock {
            exhibition_id: id,
            index: 0,
            total: 1
        }
        .is_saving());
        assert!(!SaveState::Done {
            exhibition_id: id,
            blocks_created: 1
        }
        .is_saving());
    }

    #[test]
    fn partial_failure_keeps_exhibition_id() {
        let id = Uuid::new_v4();
        let state = SaveState::Failed {
            message: "boom".into(),
            exhibition_id: Some(id),
            blocks_created: 2,
        };
        assert!(state.is_partial());
        assert_eq!(state.exhibition_id(), Some(id));
        assert_eq!(state.error_message(), Some("boom"));
    }
}
