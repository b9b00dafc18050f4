use uuid::Uuid;

use super::block::{Block, BlockId};
use super::image::ImageRef;

/// An exhibition draft held in memory while it is edited or viewed.
///
/// The backend is the system of record; a document is either created empty
/// or hydrated from a fetched exhibition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Backend id, absent until the first successful create.
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub organization: String,
    pub team: String,
    pub tags: Vec<String>,
    pub cover: Option<ImageRef>,
    /// Blocks in render order.
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub fn block_index(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Re-derive every block position from list order.
    pub fn renumber(&mut self) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.position = index;
        }
    }

    /// Whether stored positions agree with list order.
    pub fn positions_are_dense(&self) -> bool {
        self.blocks
            .iter()
            .enumerate()
            .all(|(index, block)| block.position == index)
    }

    /// Total images (cover and items) that still have to be uploaded.
    pub fn staged_image_count(&self) -> usize {
        let cover = usize::from(self.cover.as_ref().is_some_and(ImageRef::is_staged));
        cover
            + self
                .blocks
                .iter()
                .map(Block::staged_image_count)
                .sum::<usize>()
    }

    /// Shallow-merge metadata fields.
    pub fn apply_metadata(&mut self, patch: MetadataPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(organization) = patch.organization {
            self.organization = organization;
        }
        if let Some(team) = patch.team {
            self.team = team;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(cover) = patch.cover {
            self.cover = cover;
        }
    }
}

/// Partial update of the non-block fields of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub team: Option<String>,
    pub tags: Option<Vec<String>>,
    /// `Some(None)` removes the cover.
    pub cover: Option<Option<ImageRef>>,
}

impl MetadataPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
