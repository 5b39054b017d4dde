//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::constants::DEFAULT_API_URL;
use crate::messages::ui_events::{Focus, InputMode};
use crate::messages::RenderState;
use crate::models::{Banner, Car, CarDraft, DraftField, FilterCriteria, UiStatus};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Displayed cars, in the order the service returned them
    pub cars: Vec<Car>,
    pub count: Option<usize>,
    pub is_loading: bool,
    pub last_loaded: Option<DateTime<Local>>,

    // Banners
    pub error: Option<String>,
    pub success: Option<Banner>,

    // Inputs
    pub filters: FilterCriteria,
    pub draft: CarDraft,
    pub is_submitting: bool,

    // Request tracking
    pub next_request_id: u64,
    /// Only the response to this fetch may touch the list
    pub latest_fetch_id: Option<u64>,
    pub pending_create_id: Option<u64>,

    // Banner expiry
    pub next_banner_token: u64,
    /// Set when a banner needs a timer; drained by the actor
    pub banner_expiry: Option<u64>,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    /// Card grid rows scrolled past
    pub card_scroll: u16,
    /// Cards per grid row, as last reported by the UI
    pub grid_columns: usize,
    pub show_help: bool,

    pub api_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl AppState {
    pub fn new(api_url: &str) -> Self {
        AppState {
            cars: Vec::new(),
            count: None,
            is_loading: false,
            last_loaded: None,
            error: None,
            success: None,
            filters: FilterCriteria::default(),
            draft: CarDraft::default(),
            is_submitting: false,
            next_request_id: 1,
            latest_fetch_id: None,
            pending_create_id: None,
            next_banner_token: 1,
            banner_expiry: None,
            focus: Focus::Form(DraftField::Brand),
            input_mode: InputMode::Normal,
            card_scroll: 0,
            grid_columns: 1,
            show_help: false,
            api_url: api_url.to_string(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn next_token(&mut self) -> u64 {
        let token = self.next_banner_token;
        self.next_banner_token += 1;
        token
    }

    /// Hand the pending banner expiry to whoever schedules timers
    pub fn take_banner_expiry(&mut self) -> Option<u64> {
        self.banner_expiry.take()
    }

    /// Summary for logs: error beats success beats loading
    pub fn status(&self) -> UiStatus {
        if let Some(error) = &self.error {
            UiStatus::Error(error.clone())
        } else if let Some(banner) = &self.success {
            UiStatus::Success(banner.message.clone())
        } else if self.is_loading {
            UiStatus::Loading
        } else {
            UiStatus::Idle
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            cars: self.cars.clone(),
            count: self.count,
            is_loading: self.is_loading,
            last_loaded: self.last_loaded,
            card_scroll: self.card_scroll,
            error: self.error.clone(),
            success: self.success.as_ref().map(|b| b.message.clone()),
            draft: self.draft.clone(),
            filters: self.filters.clone(),
            is_submitting: self.is_submitting,
            focus: self.focus,
            input_mode: self.input_mode,
            show_help: self.show_help,
            api_url: self.api_url.clone(),
        }
    }
}
