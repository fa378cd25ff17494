// crates/market-terminal/src/ui.rs

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::components::{
    asset_list::draw_asset_list, chart::draw_chart, help::draw_help,
    order_entry::draw_order_entry, order_list::draw_order_list, status_bar::draw_status_bar,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_main_content(f, chunks[1], app);
    draw_status_bar(f, chunks[2], app);

    if app.show_help {
        draw_help(f, centered_rect(60, 70, f.size()));
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    // Left: selected asset
    let left_text = match app.dashboard.selected_asset() {
        Some(asset) => vec![
            Span::styled(
                asset.symbol.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::raw(asset.name.as_str()),
            Span::raw(" @ "),
            Span::raw(asset.formatted_price()),
        ],
        None => vec![Span::styled("No asset selected", Style::default().fg(Color::Gray))],
    };
    let left_paragraph =
        Paragraph::new(Line::from(left_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(left_paragraph, header_chunks[0]);

    // Center: account
    let center_text = format!(
        "Balance: ${:.2} | Orders: {} | Ticks: {}",
        app.dashboard.balance(),
        app.dashboard.order_count(),
        app.tick_count
    );
    let center_paragraph = Paragraph::new(center_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(center_paragraph, header_chunks[1]);

    // Right: help hints
    let help_text = "[F1]Help [Tab]Panel [/]Search";
    let right_paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(right_paragraph, header_chunks[2]);
}

fn draw_main_content(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25), // Asset list
            Constraint::Percentage(50), // Chart
            Constraint::Percentage(25), // Order panel
        ])
        .split(area);

    draw_asset_list(f, chunks[0], app);
    draw_chart(f, chunks[1], app);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    draw_order_entry(f, right_chunks[0], app);
    draw_order_list(f, right_chunks[1], app);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
