//! Save progress as an explicit state machine (MVI).

mod intent;
mod reducer;
mod state;

pub use intent::SaveIntent;
pub use reducer::SaveReducer;
pub use state::SaveState;
