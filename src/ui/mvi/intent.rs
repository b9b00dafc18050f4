//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Edits to the exhibition (add, move, remove a block)
/// - Progress of asynchronous work (an upload finished, a create failed)
pub trait Intent: Send + 'static {}
