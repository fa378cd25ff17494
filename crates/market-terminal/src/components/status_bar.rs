// crates/market-terminal/src/components/status_bar.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, NoticeLevel};

pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (msg, style) = match app.input_mode {
        InputMode::Confirm => {
            let text = app.notice.as_ref().map(|n| n.text.clone()).unwrap_or_default();
            let prompt = vec![
                Span::styled(text, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled("[Y]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw("es "),
                Span::styled("[N]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::raw("o"),
            ];
            (Line::from(prompt), Style::default().fg(Color::Yellow))
        }
        InputMode::Editing(_) => {
            let input = vec![
                Span::raw("Input: "),
                Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::Yellow)),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                Span::raw(" [Enter] Submit [Esc] Cancel"),
            ];
            (Line::from(input), Style::default().fg(Color::Yellow))
        }
        InputMode::Normal => match &app.notice {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => Color::Cyan,
                    NoticeLevel::Success => Color::Green,
                    NoticeLevel::Error => Color::Red,
                };
                let line = Line::from(vec![
                    Span::styled(
                        notice.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(notice.text.as_str(), Style::default().fg(color)),
                ]);
                (line, Style::default().fg(color))
            }
            None => (shortcuts(), Style::default()),
        },
    };

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);

    let paragraph = Paragraph::new(msg)
        .block(status_block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn shortcuts() -> Line<'static> {
    Line::from(vec![
        Span::styled("[B]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("uy "),
        Span::styled("[S]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw("ell "),
        Span::styled("[O]", Style::default().fg(Color::Yellow)),
        Span::raw("rder "),
        Span::styled("[/]", Style::default().fg(Color::Cyan)),
        Span::raw("Search "),
        Span::styled("[T]", Style::default().fg(Color::Magenta)),
        Span::raw("imeframe "),
        Span::styled("[Q]", Style::default().fg(Color::Gray)),
        Span::raw("uit"),
    ])
}
