//! # Car Lot TUI
//!
//! A terminal front-end for a Car Service REST API.
//!
//! ## Features
//! - Browse every car as a grid of cards
//! - Filter by exact year or by maximum price
//! - Add a car through a five-field form
//! - Error and success banners (success clears itself)
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (car list controller)
//! - Network Layer (Tokio runtime + reqwest)

pub mod config;
pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::AppConfig;
pub use models::{Car, CarDraft, CarList, CarQuery, DraftField, FilterCriteria, NewCar, UiStatus};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiError, CarClient, NetworkActor};
