//! Command handlers - business logic for processing UI events and responses

use chrono::Local;

use crate::app::AppState;
use crate::constants::MSG_CREATED;
use crate::messages::ui_events::{Focus, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Banner, CarDraft, CarQuery, DraftField, Operation};

impl AppState {
    // ========================
    // Loading
    // ========================

    pub fn load_all(&mut self) -> Option<NetworkCommand> {
        self.issue_fetch(CarQuery::All)
    }

    /// Filter by exact year; a blank year means "all cars"
    pub fn load_by_year(&mut self) -> Option<NetworkCommand> {
        match self.filters.year() {
            Ok(None) => self.load_all(),
            Ok(Some(year)) => self.issue_fetch(CarQuery::ByYear(year)),
            Err(e) => {
                tracing::warn!(input = %self.filters.year, error = %e, "Unusable year filter");
                self.error = Some(Operation::FetchByYear.failure_message().to_string());
                None
            }
        }
    }

    /// Filter by price ceiling; a blank price means "all cars"
    pub fn load_by_max_price(&mut self) -> Option<NetworkCommand> {
        match self.filters.max_price() {
            Ok(None) => self.load_all(),
            Ok(Some(price)) => self.issue_fetch(CarQuery::ByMaxPrice(price)),
            Err(e) => {
                tracing::warn!(input = %self.filters.max_price, error = %e, "Unusable price filter");
                self.error = Some(Operation::FetchByPrice.failure_message().to_string());
                None
            }
        }
    }

    pub fn reset_filters(&mut self) -> Option<NetworkCommand> {
        self.filters.clear();
        self.load_all()
    }

    fn issue_fetch(&mut self, query: CarQuery) -> Option<NetworkCommand> {
        let id = self.next_id();
        if let Some(previous) = self.latest_fetch_id.replace(id) {
            tracing::debug!(previous, id, "Superseding in-flight fetch");
        }
        self.is_loading = true;
        self.error = None;
        Some(NetworkCommand::FetchCars { id, query })
    }

    // ========================
    // Draft
    // ========================

    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn submit_draft(&mut self) -> Option<NetworkCommand> {
        if self.is_submitting {
            return None;
        }

        self.error = None;
        self.success = None;

        match self.draft.to_new_car() {
            Ok(car) => {
                let id = self.next_id();
                self.pending_create_id = Some(id);
                self.is_submitting = true;
                Some(NetworkCommand::CreateCar { id, car })
            }
            Err(e) => {
                // Rejected before it reaches the service; draft stays as typed
                self.error = Some(e.to_string());
                None
            }
        }
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network result. May return a follow-up command (the refresh
    /// after a successful create).
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        if !self.is_awaited(&response) {
            tracing::debug!(id = response.id(), ?response, "Dropping stale response");
            return None;
        }

        match response {
            NetworkResponse::CarsLoaded { list, .. } => {
                self.latest_fetch_id = None;
                self.is_loading = false;
                self.cars = list.cars;
                self.count = list.count;
                self.error = None;
                self.last_loaded = Some(Local::now());
                self.clamp_scroll();
                None
            }
            NetworkResponse::CarCreated { car, .. } => {
                tracing::info!(car_id = car.id, brand = %car.brand, model = %car.model, "Car added");
                self.pending_create_id = None;
                self.is_submitting = false;
                self.draft = CarDraft::default();

                let token = self.next_token();
                self.success = Some(Banner {
                    message: String::from(MSG_CREATED),
                    token,
                });
                self.banner_expiry = Some(token);

                self.load_all()
            }
            NetworkResponse::Failed { id, operation, error } => {
                if operation == Operation::Create {
                    self.pending_create_id = None;
                    self.is_submitting = false;
                } else {
                    self.latest_fetch_id = None;
                    self.is_loading = false;
                }
                tracing::warn!(id, ?operation, %error, "Request failed");
                self.error = Some(operation.failure_message().to_string());
                None
            }
        }
    }

    /// Whether `response` answers the latest fetch or the pending create
    pub fn is_awaited(&self, response: &NetworkResponse) -> bool {
        let id = Some(response.id());
        match response {
            NetworkResponse::CarsLoaded { .. } => self.latest_fetch_id == id,
            NetworkResponse::CarCreated { .. } => self.pending_create_id == id,
            NetworkResponse::Failed { operation: Operation::Create, .. } => self.pending_create_id == id,
            NetworkResponse::Failed { .. } => self.latest_fetch_id == id,
        }
    }

    /// Clear the success banner, unless a newer one replaced it
    pub fn expire_success(&mut self, token: u64) {
        if self.success.as_ref().is_some_and(|b| b.token == token) {
            self.success = None;
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_focus(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn prev_focus(&mut self) {
        self.set_focus(self.focus.prev());
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if !focus.is_input() {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn scroll_up(&mut self) {
        self.card_scroll = self.card_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.card_scroll = self.card_scroll.saturating_add(1);
        self.clamp_scroll();
    }

    /// The UI reports how many cards fit per row whenever the width changes
    pub fn set_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
        self.clamp_scroll();
    }

    /// Keep the scroll offset on the last grid row at most
    fn clamp_scroll(&mut self) {
        let columns = self.grid_columns.max(1);
        let rows = (self.cars.len() + columns - 1) / columns;
        let max = rows.saturating_sub(1).min(u16::MAX as usize) as u16;
        self.card_scroll = self.card_scroll.min(max);
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.focus.is_input() {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if self.focus.is_numeric() && !c.is_ascii_digit() {
            return;
        }
        match self.focus {
            Focus::Form(field) => {
                let mut value = self.draft.get(field).to_string();
                value.push(c);
                self.update_draft_field(field, value);
            }
            Focus::FilterYear => self.filters.year.push(c),
            Focus::FilterPrice => self.filters.max_price.push(c),
            Focus::Cars => {}
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            Focus::Form(field) => {
                let mut value = self.draft.get(field).to_string();
                value.pop();
                self.update_draft_field(field, value);
            }
            Focus::FilterYear => {
                self.filters.year.pop();
            }
            Focus::FilterPrice => {
                self.filters.max_price.pop();
            }
            Focus::Cars => {}
        }
    }

    /// Enter inside an input: submit the form or run that filter
    pub fn activate(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        match self.focus {
            Focus::Form(_) => self.submit_draft(),
            Focus::FilterYear => self.load_by_year(),
            Focus::FilterPrice => self.load_by_max_price(),
            Focus::Cars => None,
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Car, CarList, NewCar, UiStatus};
    use crate::network::ApiError;

    fn car(id: i64, brand: &str, model: &str, year: i32, price: i64) -> Car {
        Car {
            id,
            brand: brand.into(),
            model: model.into(),
            year,
            color: "Blue".into(),
            price,
        }
    }

    fn fetch_id(cmd: Option<NetworkCommand>) -> (u64, CarQuery) {
        match cmd {
            Some(NetworkCommand::FetchCars { id, query }) => (id, query),
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    fn loaded(id: u64, query: CarQuery, cars: Vec<Car>) -> NetworkResponse {
        NetworkResponse::CarsLoaded {
            id,
            query,
            list: CarList { cars, count: None },
        }
    }

    fn failed(id: u64, operation: Operation) -> NetworkResponse {
        NetworkResponse::Failed {
            id,
            operation,
            error: ApiError::Status(500),
        }
    }

    fn honda_draft() -> CarDraft {
        CarDraft {
            brand: "Honda".into(),
            model: "Civic".into(),
            year: "2021".into(),
            color: "Red".into(),
            price: "18000".into(),
        }
    }

    fn state_with(cars: Vec<Car>) -> AppState {
        let mut state = AppState::default();
        let (id, query) = fetch_id(state.load_all());
        state.handle_response(loaded(id, query, cars));
        state
    }

    #[test]
    fn test_load_all_toggles_loading() {
        let mut state = AppState::default();
        state.error = Some("old".into());

        let (id, query) = fetch_id(state.load_all());
        assert_eq!(query, CarQuery::All);
        assert!(state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.status(), UiStatus::Loading);

        state.handle_response(loaded(id, query, vec![car(1, "Toyota", "Corolla", 2022, 20000)]));
        assert!(!state.is_loading);
        assert_eq!(state.cars.len(), 1);
        assert!(state.last_loaded.is_some());
        assert_eq!(state.status(), UiStatus::Idle);
    }

    #[test]
    fn test_blank_filters_delegate_to_load_all() {
        let mut a = AppState::default();
        let mut b = AppState::default();
        let mut c = AppState::default();

        let all = a.load_all();
        b.filters.year = String::new();
        let by_year = b.load_by_year();
        c.filters.max_price = "   ".into();
        let by_price = c.load_by_max_price();

        assert_eq!(all, by_year);
        assert_eq!(all, by_price);
        assert_eq!(a.is_loading, b.is_loading);
        assert_eq!(a.is_loading, c.is_loading);
    }

    #[test]
    fn test_year_filter_with_empty_result() {
        let mut state = state_with(vec![car(1, "Toyota", "Corolla", 2022, 20000)]);
        state.filters.year = "2023".into();

        let (id, query) = fetch_id(state.load_by_year());
        assert_eq!(query, CarQuery::ByYear(2023));
        assert_eq!(query.path(), "/cars/year/2023");

        state.handle_response(loaded(id, query, vec![]));
        assert!(state.cars.is_empty());
        assert_eq!(state.error, None);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_reset_matches_direct_load_all() {
        let backing = vec![
            car(1, "Toyota", "Corolla", 2022, 20000),
            car(2, "Ford", "Focus", 2019, 12000),
        ];

        let mut filtered = state_with(backing.clone());
        filtered.filters.year = "2019".into();
        filtered.filters.max_price = "15000".into();
        let (id, query) = fetch_id(filtered.load_by_year());
        filtered.handle_response(loaded(id, query, vec![backing[1].clone()]));

        let (id, query) = fetch_id(filtered.reset_filters());
        assert_eq!(query, CarQuery::All);
        assert_eq!(filtered.filters, Default::default());
        filtered.handle_response(loaded(id, query, backing.clone()));

        let direct = state_with(backing);
        assert_eq!(filtered.cars, direct.cars);
    }

    #[test]
    fn test_failed_load_keeps_list() {
        let cars = vec![
            car(1, "Toyota", "Corolla", 2022, 20000),
            car(2, "Ford", "Focus", 2019, 12000),
        ];
        let mut state = state_with(cars.clone());

        state.filters.max_price = "10000".into();
        let (id, _) = fetch_id(state.load_by_max_price());
        state.handle_response(failed(id, Operation::FetchByPrice));

        assert_eq!(state.cars, cars);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch cars by price"));
        assert!(!state.is_loading);

        let (id, _) = fetch_id(state.load_all());
        state.handle_response(failed(id, Operation::FetchAll));
        assert_eq!(state.error.as_deref(), Some("Failed to fetch cars"));
        assert_eq!(state.cars, cars);
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut state = AppState::default();
        let (first, q1) = fetch_id(state.load_all());
        state.filters.year = "2019".into();
        let (second, q2) = fetch_id(state.load_by_year());

        // Newer request resolves first
        state.handle_response(loaded(second, q2, vec![car(2, "Ford", "Focus", 2019, 12000)]));
        state.handle_response(loaded(first, q1, vec![car(1, "Toyota", "Corolla", 2022, 20000)]));

        assert_eq!(state.cars.len(), 1);
        assert_eq!(state.cars[0].id, 2);
        assert!(!state.is_loading);

        // A late failure of the superseded request changes nothing either
        state.handle_response(failed(first, Operation::FetchAll));
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_is_awaited_matches_by_operation() {
        let mut state = AppState::default();
        let (fetch, query) = fetch_id(state.load_all());
        state.draft = honda_draft();
        let create = match state.submit_draft() {
            Some(NetworkCommand::CreateCar { id, .. }) => id,
            other => panic!("expected create, got {:?}", other),
        };

        assert!(state.is_awaited(&loaded(fetch, query, Vec::new())));
        assert!(state.is_awaited(&failed(create, Operation::Create)));
        // Right id, wrong kind of request
        assert!(!state.is_awaited(&loaded(create, query, Vec::new())));
        assert!(!state.is_awaited(&failed(fetch, Operation::Create)));

        // A create failure with a foreign id leaves the submission pending
        state.handle_response(failed(fetch, Operation::Create));
        assert!(state.is_submitting);
        assert_eq!(state.pending_create_id, Some(create));
    }

    #[test]
    fn test_submit_success_clears_draft_and_refreshes() {
        let mut state = state_with(vec![]);
        state.draft = honda_draft();

        let id = match state.submit_draft() {
            Some(NetworkCommand::CreateCar { id, car }) => {
                assert_eq!(
                    car,
                    NewCar {
                        brand: "Honda".into(),
                        model: "Civic".into(),
                        year: 2021,
                        color: "Red".into(),
                        price: 18000,
                    }
                );
                id
            }
            other => panic!("expected create, got {:?}", other),
        };
        assert!(state.is_submitting);
        // No double submit while in flight
        assert_eq!(state.submit_draft(), None);

        let follow_up = state.handle_response(NetworkResponse::CarCreated {
            id,
            car: car(9, "Honda", "Civic", 2021, 18000),
        });
        assert_eq!(fetch_id(follow_up).1, CarQuery::All);
        assert_eq!(state.draft, CarDraft::default());
        assert_eq!(state.status(), UiStatus::Success("Car added successfully!".into()));

        let token = state.take_banner_expiry().unwrap();
        assert_eq!(state.take_banner_expiry(), None);
        state.expire_success(token);
        assert_eq!(state.success, None);
    }

    #[test]
    fn test_submit_failure_keeps_draft() {
        let mut state = AppState::default();
        state.draft = honda_draft();

        let id = match state.submit_draft() {
            Some(NetworkCommand::CreateCar { id, .. }) => id,
            other => panic!("expected create, got {:?}", other),
        };
        let follow_up = state.handle_response(failed(id, Operation::Create));

        assert_eq!(follow_up, None);
        assert_eq!(state.draft, honda_draft());
        assert_eq!(state.error.as_deref(), Some("Failed to add car"));
        assert!(!state.is_submitting);
        assert_eq!(state.take_banner_expiry(), None);
    }

    #[test]
    fn test_invalid_draft_never_sent() {
        let mut state = AppState::default();
        state.draft = honda_draft();
        state.draft.model.clear();

        assert_eq!(state.submit_draft(), None);
        assert_eq!(state.error.as_deref(), Some("Model is required"));
        assert_eq!(state.draft.brand, "Honda");
        assert!(!state.is_submitting);
    }

    #[test]
    fn test_stale_banner_token_ignored() {
        let mut state = AppState::default();
        state.success = Some(Banner {
            message: MSG_CREATED.into(),
            token: 5,
        });
        state.expire_success(4);
        assert!(state.success.is_some());
        state.expire_success(5);
        assert!(state.success.is_none());
    }

    #[test]
    fn test_typing_respects_numeric_fields() {
        let mut state = AppState::default();
        state.focus = Focus::Form(DraftField::Year);
        state.start_editing();
        for c in "20x2-3".chars() {
            state.enter_char(c);
        }
        assert_eq!(state.draft.year, "2023");
        state.delete_char();
        assert_eq!(state.draft.year, "202");

        state.focus = Focus::Form(DraftField::Brand);
        state.enter_char('K');
        state.enter_char('1');
        assert_eq!(state.draft.brand, "K1");
    }

    #[test]
    fn test_activate_runs_focused_action() {
        let mut state = AppState::default();
        state.focus = Focus::FilterPrice;
        state.start_editing();
        state.enter_char('9');

        let (_, query) = fetch_id(state.activate());
        assert_eq!(query, CarQuery::ByMaxPrice(9));
        assert_eq!(state.input_mode, InputMode::Normal);

        state.focus = Focus::Cars;
        assert_eq!(state.activate(), None);
    }

    #[test]
    fn test_scroll_stops_at_last_grid_row() {
        let cars = (1..=10).map(|id| car(id, "Toyota", "Corolla", 2022, 20000)).collect();
        let mut state = state_with(cars);
        state.set_grid_columns(3);

        for _ in 0..9 {
            state.scroll_down();
        }
        assert_eq!(state.card_scroll, 3);

        state.scroll_up();
        assert_eq!(state.card_scroll, 2);

        // Widening the terminal pulls the offset back onto a real row
        state.scroll_down();
        state.set_grid_columns(5);
        assert_eq!(state.card_scroll, 1);
    }

    #[test]
    fn test_leaving_inputs_stops_editing() {
        let mut state = AppState::default();
        state.focus = Focus::FilterPrice;
        state.start_editing();
        state.next_focus();
        assert_eq!(state.focus, Focus::Cars);
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
