//! Persistence adapter: documents to backend create calls and back.

mod error;
mod load;
pub mod progress;
mod publisher;

pub use error::SaveError;
pub use load::{document_from_response, load_exhibition};
pub use publisher::{ExhibitionPublisher, SaveOutcome};
