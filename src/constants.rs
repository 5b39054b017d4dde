//! Application constants
//!
//! Centralized location for user-facing strings and configuration defaults.

/// Base URL of the Car Service when neither config nor env override it
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL
pub const API_URL_ENV: &str = "CARLOT_API_URL";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How long the success banner stays up
pub const DEFAULT_BANNER_SECS: u64 = 3;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "carlot.log";

pub const MSG_FETCH_FAILED: &str = "Failed to fetch cars";
pub const MSG_FETCH_YEAR_FAILED: &str = "Failed to fetch cars by year";
pub const MSG_FETCH_PRICE_FAILED: &str = "Failed to fetch cars by price";
pub const MSG_CREATE_FAILED: &str = "Failed to add car";
pub const MSG_CREATED: &str = "Car added successfully!";

/// Application name
pub const APP_NAME: &str = "Car Lot";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
