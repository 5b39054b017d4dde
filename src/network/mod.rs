//! Network layer - Car Service HTTP calls
//!
//! The Network actor receives fetch/create commands and sends back responses.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::NetworkActor;
pub use client::CarClient;
pub use error::ApiError;
