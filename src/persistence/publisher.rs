//! Save: turn a document into backend create calls.

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::types::{BlockCreate, BlockItemCreate, ExhibitionCreate};
use crate::api::{ApiClient, ApiError};
use crate::config::{Config, ExhibitionDefaults};
use crate::model::{Block, Document, ImageRef};
use crate::session::{SecureString, Session};
use crate::ui::mvi::Reducer;

use super::error::SaveError;
use super::progress::{SaveIntent, SaveReducer, SaveState};

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved {
        exhibition_id: Uuid,
        blocks_created: usize,
    },
    /// Another save was in flight; nothing was sent.
    Skipped,
}

/// Publishes documents as new exhibitions, one save at a time.
pub struct ExhibitionPublisher {
    client: ApiClient,
    session: Session,
    defaults: ExhibitionDefaults,
    upload_prefix: String,
    state: Mutex<SaveState>,
}

impl ExhibitionPublisher {
    pub fn new(client: ApiClient, session: Session, config: &Config) -> Self {
        Self {
            client,
            session,
            defaults: config.exhibition.clone(),
            upload_prefix: config.uploads.exhibition_prefix.clone(),
            state: Mutex::new(SaveState::Idle),
        }
    }

    pub fn state(&self) -> SaveState {
        self.state.lock().clone()
    }

    pub fn is_saving(&self) -> bool {
        self.state.lock().is_saving()
    }

    /// Forget the result of the last save. Ignored while saving.
    pub fn reset(&self) {
        self.dispatch(SaveIntent::Reset);
    }

    /// Save `document` as a new exhibition.
    ///
    /// Uploads the staged cover, creates the exhibition, then uploads each
    /// block's staged images and creates the block, strictly in position
    /// order. Returns `Skipped` without any request when a save is already
    /// running on this publisher.
    pub async fn save(&self, document: &Document) -> Result<SaveOutcome, SaveError> {
        if document.title.trim().is_empty() {
            return Err(SaveError::Validation(
                "The exhibition needs a title.".to_string(),
            ));
        }
        if let Some(id) = document.id {
            return Err(SaveError::AlreadyCreated(id));
        }
        let token = self
            .session
            .require_token()
            .map_err(|_| SaveError::Unauthenticated)?;

        let has_staged_cover = document.cover.as_ref().is_some_and(ImageRef::is_staged);
        {
            let mut state = self.state.lock();
            if state.is_saving() {
                debug!("save already in progress, skipping");
                return Ok(SaveOutcome::Skipped);
            }
            *state = SaveReducer::reduce(
                std::mem::take(&mut *state),
                SaveIntent::Start { has_staged_cover },
            );
        }

        debug!(
            blocks = document.blocks.len(),
            staged_images = document.staged_image_count(),
            "saving exhibition"
        );

        // A dropped future must not leave the publisher stuck in a saving state.
        let _interrupted = scopeguard::guard((), |_| {
            if self.is_saving() {
                self.dispatch(SaveIntent::Failed {
                    message: "save interrupted".to_string(),
                });
            }
        });

        match self.run(document, &token).await {
            Ok((exhibition_id, blocks_created)) => {
                info!(%exhibition_id, blocks_created, "exhibition saved");
                Ok(SaveOutcome::Saved {
                    exhibition_id,
                    blocks_created,
                })
            }
            Err(err) => {
                match err.exhibition_id() {
                    Some(exhibition_id) => {
                        warn!(%exhibition_id, error = %err, "exhibition saved partially")
                    }
                    None => warn!(error = %err, "exhibition save failed"),
                }
                self.dispatch(SaveIntent::Failed {
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        document: &Document,
        token: &SecureString,
    ) -> Result<(Uuid, usize), SaveError> {
        let cover_image_key = match &document.cover {
            Some(ImageRef::Staged(staged)) => {
                let upload = self
                    .client
                    .upload_image(&self.upload_prefix, staged, "cover", Some(token))
                    .await
                    .map_err(SaveError::CoverUpload)?;
                self.dispatch(SaveIntent::CoverUploaded);
                Some(upload.object_key)
            }
            Some(ImageRef::Remote { key, .. }) => Some(key.clone()),
            None => None,
        };

        let request = ExhibitionCreate {
            title: document.title.trim().to_string(),
            description: document.description.clone(),
            cover_image_key,
            tags: document.tags.clone(),
            status: self.defaults.status.clone(),
            cover_type: self.defaults.cover_type.clone(),
            date_template: self.defaults.date_template.clone(),
            start_year: self.defaults.start_year,
            end_year: self.defaults.end_year,
            rating: self.defaults.rating,
            organization_id: self.session.selected_organization(),
        };
        let exhibition = self
            .client
            .create_exhibition(&request, token)
            .await
            .map_err(SaveError::CreateExhibition)?;
        let exhibition_id = exhibition.id;

        let mut blocks: Vec<&Block> = document.blocks.iter().collect();
        blocks.sort_by_key(|block| block.position);
        let total = blocks.len();

        debug!(%exhibition_id, total, "exhibition created, saving blocks");
        self.dispatch(SaveIntent::ExhibitionCreated {
            exhibition_id,
            total_blocks: total,
        });

        for (index, block) in blocks.into_iter().enumerate() {
            let fail = |source: ApiError| SaveError::CreateBlock {
                index,
                exhibition_id,
                blocks_created: index,
                source,
            };

            let payload = self
                .block_payload(block, index, token)
                .await
                .map_err(fail)?;
            self.client
                .create_block(exhibition_id, &payload, token)
                .await
                .map_err(fail)?;

            debug!(%exhibition_id, index, kind = %block.kind, "block saved");
            self.dispatch(SaveIntent::BlockCreated);
        }

        Ok((exhibition_id, total))
    }

    /// Upload the block's staged images one at a time and build its payload.
    async fn block_payload(
        &self,
        block: &Block,
        position: usize,
        token: &SecureString,
    ) -> Result<BlockCreate, ApiError> {
        let mut items = Vec::with_capacity(block.items.len());
        for (slot, item) in block.items.iter().enumerate() {
            let image_key = match &item.image {
                Some(ImageRef::Staged(staged)) => {
                    let stem = format!("{}-{}", block.id, slot);
                    let upload = self
                        .client
                        .upload_image(&self.upload_prefix, staged, &stem, Some(token))
                        .await?;
                    Some(upload.object_key)
                }
                Some(ImageRef::Remote { key, .. }) => Some(key.clone()),
                None => None,
            };
            items.push(BlockItemCreate {
                position: slot,
                text: item.text.clone(),
                image_key,
            });
        }

        Ok(BlockCreate {
            block_type: block.kind.as_str().to_string(),
            content: block.content.clone(),
            settings: block.settings.to_json(),
            position,
            items,
        })
    }

    fn dispatch(&self, intent: SaveIntent) {
        let mut state = self.state.lock();
        *state = SaveReducer::reduce(std::mem::take(&mut *state), intent);
        debug!(state = ?*state, "save state changed");
    }
}
