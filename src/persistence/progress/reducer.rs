//! Reducer for save progress.

use crate::ui::mvi::Reducer;

use super::intent::SaveIntent;
use super::state::SaveState;

pub struct SaveReducer;

impl Reducer for SaveReducer {
    type State = SaveState;
    type Intent = SaveIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SaveIntent::Start { has_staged_cover } => {
                if state.is_saving() {
                    state
                } else if has_staged_cover {
                    SaveState::UploadingCover
                } else {
                    SaveState::CreatingExhibition
                }
            }

            SaveIntent::CoverUploaded => match state {
                SaveState::UploadingCover => SaveState::CreatingExhibition,
                other => other,
            },

            SaveIntent::ExhibitionCreated {
                exhibition_id,
                total_blocks,
            } => match state {
                SaveState::CreatingExhibition if total_blocks == 0 => SaveState::Done {
                    exhibition_id,
                    blocks_created: 0,
                },
                SaveState::CreatingExhibition => SaveState::CreatingBlock {
                    exhibition_id,
                    index: 0,
                    total: total_blocks,
                },
                other => other,
            },

            SaveIntent::BlockCreated => match state {
                SaveState::CreatingBlock {
                    exhibition_id,
                    index,
                    total,
                } => {
                    if index + 1 >= total {
                        SaveState::Done {
                            exhibition_id,
                            blocks_created: total,
                        }
                    } else {
                        SaveState::CreatingBlock {
                            exhibition_id,
                            index: index + 1,
                            total,
                        }
                    }
                }
                other => other,
            },

            SaveIntent::Failed { message } => match state {
                SaveState::CreatingBlock {
                    exhibition_id,
                    index,
                    ..
                } => SaveState::Failed {
                    message,
                    exhibition_id: Some(exhibition_id),
                    blocks_created: index,
                },
                SaveState::UploadingCover | SaveState::CreatingExhibition => SaveState::Failed {
                    message,
                    exhibition_id: None,
                    blocks_created: 0,
                },
                other => other,
            },

            SaveIntent::Reset => match state {
                state if state.is_saving() => state,
                _ => SaveState::Idle,
            },
        }
    }
}
