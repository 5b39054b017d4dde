use ratatui::{prelude::*, widgets::*};

use crate::models::Car;

/// Width of one car card including borders
pub const CARD_WIDTH: u16 = 30;
/// Height of one car card including borders
pub const CARD_HEIGHT: u16 = 6;

/// Renders a single-line text input
pub fn render_input<'a>(
    content: &'a str,
    title: &'a str,
    is_focused: bool,
    is_editing: bool,
) -> Paragraph<'a> {
    let style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    if content.is_empty() && !is_editing {
        Paragraph::new(Span::styled(title.trim(), Style::default().fg(Color::DarkGray))).block(block)
    } else {
        Paragraph::new(content).block(block)
    }
}

/// Dollar amount with thousands separators, e.g. `$20,000`
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if price < 0 { "-" } else { "" };
    format!("{}${}", sign, grouped)
}

/// Card title: brand and model
pub fn card_title(car: &Car) -> String {
    format!("{} {}", car.brand, car.model)
}

/// Body lines of a car card
pub fn card_lines(car: &Car) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("Year: ", Style::default().bold()),
            Span::raw(car.year.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Color: ", Style::default().bold()),
            Span::raw(car.color.clone()),
        ]),
        Line::from(Span::styled(
            format_price(car.price),
            Style::default().fg(Color::Green).bold(),
        )),
    ]
}

/// How many cards fit side by side
pub fn grid_columns(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// The card widget for one car
pub fn render_card(car: &Car) -> Paragraph<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(Span::styled(card_title(car), Style::default().fg(Color::White).bold()));

    Paragraph::new(card_lines(car)).block(block)
}

/// Error/success banner line
pub fn render_banner(message: &str, is_error: bool) -> Paragraph<'_> {
    let style = if is_error {
        Style::default().fg(Color::White).bg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    };
    Paragraph::new(format!(" {} ", message)).style(style)
}

/// Rect of the given percentage size centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
