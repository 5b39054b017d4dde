//! App actor - message loop processing UI events, network responses and
//! banner timers

use std::time::Duration;

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::app::timer::BannerTimer;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns the controller state
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
    banner_timer: BannerTimer,
}

impl AppActor {
    pub fn new(
        state: AppState,
        banner_ttl: Duration,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
            banner_timer: BannerTimer::new(banner_ttl),
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let (expiry_tx, mut expiry_rx) = mpsc::unbounded_channel::<u64>();

        // Initial fetch, like opening the page
        let initial = self.state.load_all();
        self.send(initial);
        self.render();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    tracing::debug!(status = ?self.state.status(), cars = self.state.cars.len(), "Response applied");
                    self.send(follow_up);
                }
                Some(token) = expiry_rx.recv() => {
                    self.state.expire_success(token);
                }
                else => break,
            }

            if let Some(token) = self.state.take_banner_expiry() {
                self.banner_timer.schedule(token, expiry_tx.clone());
            }
            self.render();
        }

        self.banner_timer.cancel();
        tracing::info!("App actor stopped");
    }

    fn send(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            let _ = self.network_tx.send(cmd);
        }
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus
            UiEvent::NextFocus => self.state.next_focus(),
            UiEvent::PrevFocus => self.state.prev_focus(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::Activate => {
                let cmd = self.state.activate();
                self.send(cmd);
            }

            // Car actions
            UiEvent::SubmitDraft => {
                let cmd = self.state.submit_draft();
                self.send(cmd);
            }
            UiEvent::SearchByYear => {
                let cmd = self.state.load_by_year();
                self.send(cmd);
            }
            UiEvent::SearchByPrice => {
                let cmd = self.state.load_by_max_price();
                self.send(cmd);
            }
            UiEvent::ResetFilters => {
                let cmd = self.state.reset_filters();
                self.send(cmd);
            }
            UiEvent::Refresh => {
                let cmd = self.state.load_all();
                self.send(cmd);
            }

            // Layout
            UiEvent::GridColumns(columns) => self.state.set_grid_columns(columns),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
