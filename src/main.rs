//! Car Lot TUI - Actor-based Car Service front-end
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - car list controller processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use carlot_tui::config::{self, AppConfig};
use carlot_tui::constants::{APP_NAME, APP_VERSION};
use carlot_tui::messages::ui_events::key_to_ui_event;
use carlot_tui::messages::{Focus, InputMode, NetworkCommand, NetworkResponse, RenderState, UiEvent};
use carlot_tui::models::DraftField;
use carlot_tui::ui::{self, CARD_HEIGHT};
use carlot_tui::{AppActor, AppState, CarClient, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config().context("Failed to load configuration")?;

    // Log to a file; stdout belongs to the terminal UI
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "carlot.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, api_url = %config.api_url, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run(&mut terminal, &config).await
}

/// Wire the actors together and drive the UI until quit
async fn run(terminal: &mut Terminal<impl Backend>, config: &AppConfig) -> anyhow::Result<()> {
    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let client = CarClient::new(config.base_url(), config.request_timeout());
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let state = AppState::new(config.base_url());
    let app_actor = AppActor::new(state, config.success_banner_ttl(), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(terminal, ui_tx, &mut render_rx).await
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut columns = 0;

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // The cars block spans the full width minus its borders
        let width = terminal.size()?.width.saturating_sub(2);
        if ui::grid_columns(width) != columns {
            columns = ui::grid_columns(width);
            let _ = ui_tx.send(UiEvent::GridColumns(columns));
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.focus,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let banner_rows = state.error.is_some() as u16 + state.success.is_some() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Title
            Constraint::Length(banner_rows), // Banners
            Constraint::Length(4),           // Add car form
            Constraint::Length(3),           // Filters
            Constraint::Min(0),              // Cars
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    draw_title(f, state, chunks[0]);
    draw_banners(f, state, chunks[1]);
    draw_form(f, state, chunks[2]);
    draw_filters(f, state, chunks[3]);
    draw_cars(f, state, chunks[4]);
    draw_status_bar(f, state, chunks[5]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" 🚗 {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!("  {}", state.api_url), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_banners(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut rows = Vec::new();
    if let Some(error) = &state.error {
        rows.push((error.as_str(), true));
    }
    if let Some(success) = &state.success {
        rows.push((success.as_str(), false));
    }

    for (i, (message, is_error)) in rows.into_iter().enumerate() {
        let row = Rect::new(area.x, area.y + i as u16, area.width, 1).intersection(area);
        f.render_widget(ui::render_banner(message, is_error), row);
    }
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let title = if state.is_submitting {
        " Add New Car [saving...]"
    } else {
        " Add New Car (s:submit)"
    };
    f.render_widget(Paragraph::new(title).style(Style::default().bold()), rows[0]);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(rows[1]);

    for (field, cell) in DraftField::ALL.iter().zip(cells.iter()) {
        let focused = state.focus == Focus::Form(*field);
        let title = format!(" {} ", field.label());
        draw_input(f, state, state.draft.get(*field), &title, focused, *cell);
    }
}

fn draw_filters(f: &mut Frame, state: &RenderState, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    draw_input(
        f,
        state,
        &state.filters.year,
        " Filter by year (y:search) ",
        state.focus == Focus::FilterYear,
        cells[0],
    );
    draw_input(
        f,
        state,
        &state.filters.max_price,
        " Max price (p:search) ",
        state.focus == Focus::FilterPrice,
        cells[1],
    );

    let show_all = Paragraph::new(" a: Show All Cars ")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(show_all, cells[2]);
}

fn draw_input(f: &mut Frame, state: &RenderState, content: &str, title: &str, focused: bool, area: Rect) {
    let editing = focused && state.input_mode == InputMode::Editing;
    f.render_widget(ui::render_input(content, title, focused, editing), area);

    if editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + content.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_cars(f: &mut Frame, state: &RenderState, area: Rect) {
    let focused = state.focus == Focus::Cars;
    let count = state.count.unwrap_or(state.cars.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        })
        .title(format!(" Cars ({}) ", count));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.is_loading {
        let loading = Paragraph::new("Loading cars...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(loading, inner);
        return;
    }

    if state.cars.is_empty() {
        let empty = Paragraph::new("No cars found")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    let columns = ui::grid_columns(inner.width);
    let total_rows = (state.cars.len() + columns - 1) / columns;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let first_row = (state.card_scroll as usize).min(total_rows.saturating_sub(1));
    let card_width = inner.width / columns as u16;

    for (row, chunk) in state
        .cars
        .chunks(columns)
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
    {
        let y = inner.y + ((row - first_row) as u16) * CARD_HEIGHT;
        for (col, car) in chunk.iter().enumerate() {
            let x = inner.x + col as u16 * card_width;
            let rect = Rect::new(x, y, card_width, CARD_HEIGHT).intersection(inner);
            f.render_widget(ui::render_card(car), rect);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Enter:run | Tab:next field "
    } else {
        " Tab:focus | e:edit | s:add | y/p:filter | a:all | r:refresh | ?:help | q:quit "
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if state.is_loading {
        spans.push(Span::styled(" Loading... ", Style::default().fg(Color::Yellow)));
    } else if let Some(at) = state.last_loaded {
        spans.push(Span::styled(
            format!(" updated {} ", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = ui::centered_rect(60, 70, area);

    let help_text = r#"
 CAR LOT - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Next / previous input
   ↑ / ↓              Scroll cars

 FORM & FILTERS
   e / Enter          Edit focused input
   Enter (editing)    Submit form / run filter
   Esc                Stop editing
   s                  Add car
   y                  Search by year
   p                  Search by max price
   a                  Show all cars (clear filters)
   r                  Refresh

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use carlot_tui::constants::{MSG_CREATED, MSG_FETCH_FAILED};
    use carlot_tui::models::Car;
    use ratatui::backend::TestBackend;

    /// Draw one frame and return the screen as text rows
    fn screen(state: &RenderState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn row_of(rows: &[String], needle: &str) -> Option<usize> {
        rows.iter().position(|row| row.contains(needle))
    }

    fn loaded_state(cars: Vec<Car>) -> RenderState {
        RenderState {
            cars,
            is_loading: false,
            ..RenderState::default()
        }
    }

    fn toyota() -> Car {
        Car {
            id: 1,
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2022,
            color: "Blue".into(),
            price: 20000,
        }
    }

    #[test]
    fn test_loading_hides_cards() {
        let state = RenderState {
            cars: vec![toyota()],
            is_loading: true,
            ..RenderState::default()
        };
        let rows = screen(&state);

        assert!(row_of(&rows, "Loading cars...").is_some());
        assert!(row_of(&rows, "Toyota Corolla").is_none());
        assert!(row_of(&rows, "No cars found").is_none());
    }

    #[test]
    fn test_empty_list_message() {
        let rows = screen(&loaded_state(Vec::new()));

        assert!(row_of(&rows, "No cars found").is_some());
        assert!(row_of(&rows, "Loading cars...").is_none());
    }

    #[test]
    fn test_car_card_contents() {
        let rows = screen(&loaded_state(vec![toyota()]));

        for text in ["Toyota Corolla", "Year: 2022", "Color: Blue", "$20,000"] {
            assert!(row_of(&rows, text).is_some(), "missing {:?} in\n{}", text, rows.join("\n"));
        }
        assert!(row_of(&rows, "No cars found").is_none());
    }

    #[test]
    fn test_banners_stack_above_list() {
        let state = RenderState {
            cars: vec![toyota()],
            is_loading: true,
            error: Some(MSG_FETCH_FAILED.to_string()),
            success: Some(MSG_CREATED.to_string()),
            ..RenderState::default()
        };
        let rows = screen(&state);

        let error = row_of(&rows, MSG_FETCH_FAILED).expect("error banner");
        let success = row_of(&rows, MSG_CREATED).expect("success banner");
        let loading = row_of(&rows, "Loading cars...").expect("loading message");
        assert!(error < success);
        assert!(success < loading);
    }
}
