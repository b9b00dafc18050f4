use super::block::{Block, BlockId, Item};
use super::kind::BlockKind;
use super::settings::BlockSettings;

/// Caller-supplied initial data for a new block. Absent fields start empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockInit {
    pub content: Option<String>,
    pub items: Option<Vec<Item>>,
    pub settings: Option<BlockSettings>,
}

impl BlockInit {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Construct a block of `kind` at `position`.
///
/// Items default to the kind's number of blank slots. Supplied items are
/// kept in order and padded with blanks up to that number so every layout
/// slot exists. Supplied settings are merged over the kind's defaults.
pub fn create_block(id: BlockId, kind: BlockKind, position: usize, init: BlockInit) -> Block {
    let slots = kind.default_item_count();
    let mut items = init.items.unwrap_or_default();
    while items.len() < slots {
        items.push(Item::blank());
    }

    let defaults = BlockSettings::default_for(&kind);
    let settings = match init.settings {
        Some(settings) => defaults.merge(settings),
        None => defaults,
    };

    Block {
        id,
        kind,
        position,
        content: init.content,
        settings,
        items,
    }
}
