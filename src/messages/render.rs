//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::messages::ui_events::{Focus, InputMode};
use crate::models::{Car, CarDraft, DraftField, FilterCriteria};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Car list
    pub cars: Vec<Car>,
    pub count: Option<usize>,
    pub is_loading: bool,
    pub last_loaded: Option<DateTime<Local>>,
    pub card_scroll: u16,

    // Banners
    pub error: Option<String>,
    pub success: Option<String>,

    // Inputs
    pub draft: CarDraft,
    pub filters: FilterCriteria,
    pub is_submitting: bool,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub show_help: bool,

    pub api_url: String,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_API_URL;
        RenderState {
            cars: Vec::new(),
            count: None,
            // The first load is issued on startup
            is_loading: true,
            last_loaded: None,
            card_scroll: 0,
            error: None,
            success: None,
            draft: CarDraft::default(),
            filters: FilterCriteria::default(),
            is_submitting: false,
            focus: Focus::Form(DraftField::Brand),
            input_mode: InputMode::Normal,
            show_help: false,
            api_url: String::from(DEFAULT_API_URL),
        }
    }
}
