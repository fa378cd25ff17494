// crates/market-terminal/src/components/mod.rs

pub mod asset_list;
pub mod chart;
pub mod order_entry;
pub mod order_list;
pub mod status_bar;
pub mod help;

use ratatui::style::{Color, Style};

use crate::app::{App, Panel};

/// Border style of a panel, highlighted when it has focus.
pub(crate) fn panel_border(app: &App, panel: Panel) -> Style {
    Style::default().fg(if app.current_panel == panel {
        Color::Yellow
    } else {
        Color::White
    })
}
