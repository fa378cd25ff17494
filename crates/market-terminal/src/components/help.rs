// crates/market-terminal/src/components/help.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const KEYS: &[(&str, &str, Color)] = &[
    ("Tab / Shift+Tab", "Next / previous panel", Color::Blue),
    ("↑/k ↓/j", "Move selection", Color::White),
    ("Enter", "View asset / place order", Color::White),
    ("/", "Search assets (Esc clears)", Color::Yellow),
    ("c", "Next category tab", Color::Yellow),
    ("[ ] / t", "Previous / next timeframe", Color::Magenta),
    ("b / s", "Buy / Sell", Color::Green),
    ("+ / -", "Amount up / down by 10", Color::Cyan),
    ("a", "Type amount", Color::Cyan),
    ("p / l", "Toggle take profit / stop loss", Color::Cyan),
    ("P / L", "Type take profit / stop loss", Color::Cyan),
    ("o", "Place order", Color::Green),
    ("x", "Cancel highlighted order", Color::Red),
    ("y / n", "Answer volatility prompt", Color::Yellow),
    ("F1", "Toggle help", Color::Gray),
    ("q", "Quit", Color::Red),
];

pub fn draw_help(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);

    let help_items: Vec<ListItem> = KEYS
        .iter()
        .map(|(keys, action, color)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{keys:>15}"), Style::default().fg(*color).add_modifier(Modifier::BOLD)),
                Span::raw(" - "),
                Span::raw(*action),
            ]))
        })
        .collect();

    let help_list = List::new(help_items).block(
        Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(help_list, area);

    let footer = Paragraph::new("Press F1 or ESC to close help")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };

    f.render_widget(footer, footer_area);
}
