use std::fmt;

use uuid::Uuid;

use super::image::ImageRef;
use super::kind::BlockKind;
use super::settings::BlockSettings;

/// Identifier of a block, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id for a block created in this session.
    pub fn generate() -> Self {
        Self(format!("block-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an item inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("item-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One slot of a block: an optional image with an optional caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub image: Option<ImageRef>,
    pub text: Option<String>,
}

impl Item {
    /// Empty placeholder slot.
    pub fn blank() -> Self {
        Self {
            id: ItemId::generate(),
            image: None,
            text: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A content block of an exhibition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Zero-based render position. Always equal to the block's index in
    /// `Document::blocks` after a structural edit.
    pub position: usize,
    pub content: Option<String>,
    pub settings: BlockSettings,
    pub items: Vec<Item>,
}

impl Block {
    /// Mutable access to the item at `index`, growing the list with blank
    /// items when the slot does not exist yet.
    pub fn item_slot_mut(&mut self, index: usize) -> &mut Item {
        while self.items.len() <= index {
            self.items.push(Item::blank());
        }
        &mut self.items[index]
    }

    /// Shallow-merge a patch into this block.
    pub fn apply(&mut self, patch: BlockPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(settings) = patch.settings {
            let current = std::mem::take(&mut self.settings);
            self.settings = current.merge(settings);
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
    }

    /// Number of items holding an image that still has to be uploaded.
    pub fn staged_image_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.image.as_ref().is_some_and(ImageRef::is_staged))
            .count()
    }
}

/// Partial update of a block. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockPatch {
    /// `Some(None)` clears the content.
    pub content: Option<Option<String>>,
    pub settings: Option<BlockSettings>,
    pub items: Option<Vec<Item>>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(Some(content.into())),
            ..Self::default()
        }
    }

    pub fn settings(settings: BlockSettings) -> Self {
        Self {
            settings: Some(settings),
            ..Self::default()
        }
    }
}
