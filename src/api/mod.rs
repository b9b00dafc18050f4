//! REST client for the exhibition backend.

mod client;
mod error;
pub mod types;

pub use client::{ApiClient, ListParams};
pub use error::ApiError;
