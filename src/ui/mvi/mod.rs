//! Model-View-Intent (MVI) primitives.
//!
//! Editing the exhibition and tracking a save both follow the same
//! unidirectional flow:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Render
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! - **State**: a complete snapshot; readers never see a half-applied edit
//! - **Intent**: a user edit or a network completion
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
