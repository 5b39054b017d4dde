//! App layer - the car list controller
//!
//! The App actor receives UI events, network responses and banner expiries,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod timer;

pub use state::AppState;
pub use actor::AppActor;
pub use timer::BannerTimer;
