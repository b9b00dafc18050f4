//! Editing state (MVI) and the render projection of documents.

pub mod editor;
pub mod mvi;
pub mod render;
