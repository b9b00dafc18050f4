//! Exhibition document model.
//!
//! A `Document` is an ordered list of `Block`s plus exhibition metadata.
//! Blocks are created through `create_block`, which fills kind-specific
//! defaults (item slots and settings).

mod block;
mod document;
mod factory;
mod image;
mod kind;
mod settings;

pub use block::{Block, BlockId, BlockPatch, Item, ItemId};
pub use document::{Document, MetadataPatch};
pub use factory::{create_block, BlockInit};
pub use image::{file_url, mime_for_extension, ImageError, ImageRef, StagedImage};
pub use kind::BlockKind;
pub use settings::{
    BlockSettings, CarouselSettings, LayoutSettings, QuoteSettings, VideoSettings,
};
