//! Render projection of documents into styled terminal text.

mod projection;
pub mod theme;

pub use projection::{
    render_block, render_document, render_header, to_plain_text, BlockAction, RenderContext,
    RenderMode, RenderedBlock,
};
