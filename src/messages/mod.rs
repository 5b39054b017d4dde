//! Message types passed between the UI, App and Network actors.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::{Focus, InputMode, UiEvent};
pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;
