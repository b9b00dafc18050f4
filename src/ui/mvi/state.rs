//! Base trait for state snapshots.

/// Marker trait for state objects.
///
/// States are cloned to produce new snapshots, compared to detect changes,
/// and start from `Default`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
