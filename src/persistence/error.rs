use thiserror::Error;
use uuid::Uuid;

use crate::api::ApiError;

/// Why a save did not complete.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Local validation failed; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthenticated,

    /// The document already exists on the backend.
    #[error("Exhibition {0} has already been saved")]
    AlreadyCreated(Uuid),

    #[error("Failed to upload cover image: {0}")]
    CoverUpload(#[source] ApiError),

    #[error("Failed to create exhibition: {0}")]
    CreateExhibition(#[source] ApiError),

    /// Block `index` failed. The exhibition exists with `blocks_created`
    /// blocks; nothing is rolled back.
    #[error(
        "Failed to save block {index} of exhibition {exhibition_id} \
         ({blocks_created} saved): {source}"
    )]
    CreateBlock {
        index: usize,
        exhibition_id: Uuid,
        blocks_created: usize,
        #[source]
        source: ApiError,
    },
}

impl SaveError {
    /// Exhibition left behind by a partial save.
    pub fn exhibition_id(&self) -> Option<Uuid> {
        match self {
            SaveError::CreateBlock { exhibition_id, .. } => Some(*exhibition_id),
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SaveError::CoverUpload(source)
            | SaveError::CreateExhibition(source)
            | SaveError::CreateBlock { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Message for the author. Backend failures collapse to one generic text.
    pub fn user_message(&self) -> String {
        match self {
            SaveError::Validation(message) => message.clone(),
            SaveError::Unauthenticated => "Please log in to save the exhibition.".to_string(),
            SaveError::AlreadyCreated(_) => "This exhibition has already been saved.".to_string(),
            SaveError::CoverUpload(source) | SaveError::CreateExhibition(source) => {
                source.user_message("save the exhibition")
            }
            SaveError::CreateBlock {
                exhibition_id,
                blocks_created,
                source,
                ..
            } => format!(
                "{} The exhibition {} was created with {} block(s).",
                source.user_message("save the exhibition"),
                exhibition_id,
                blocks_created
            ),
        }
    }
}
