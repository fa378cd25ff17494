// crates/market-terminal/src/components/order_list.rs

use market_core::asset::format_price;
use market_core::{Direction as Side, OrderStatus};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Panel};
use crate::components::panel_border;

pub fn draw_order_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(
            " Recent Orders ({}/{}) ",
            app.dashboard.order_count(),
            app.dashboard.order_cap()
        ))
        .borders(Borders::ALL)
        .border_style(panel_border(app, Panel::Orders));

    if app.dashboard.order_count() == 0 {
        let empty = Paragraph::new("No orders yet")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Time", "Sym", "Side", "Amount", "Price", "Status"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .dashboard
        .orders()
        .enumerate()
        .map(|(i, order)| {
            let style = if i == app.selected_order_index && app.current_panel == Panel::Orders {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let side_style = match order.direction {
                Side::Buy => style.fg(Color::Green),
                Side::Sell => style.fg(Color::Red),
            };

            let status_style = match order.status {
                OrderStatus::Pending => style.fg(Color::Yellow),
                OrderStatus::Executed => style.fg(Color::Blue),
                OrderStatus::Cancelled => style.fg(Color::DarkGray),
            };

            // Orders keep their symbol even if the asset leaves the registry.
            let price = match app.registry.get(&order.asset_id) {
                Some(asset) => format_price(order.price, asset.category),
                None => format!("{:.2}", order.price),
            };

            Row::new(vec![
                Cell::from(order.timestamp.format("%H:%M:%S").to_string()).style(style),
                Cell::from(order.asset_symbol.clone()).style(style),
                Cell::from(order.direction.as_str()).style(side_style),
                Cell::from(format!("${}", order.amount)).style(style),
                Cell::from(price).style(style),
                Cell::from(order.status.as_str()).style(status_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8), // Time
        Constraint::Length(9), // Symbol
        Constraint::Length(4), // Side
        Constraint::Length(7), // Amount
        Constraint::Length(10), // Price
        Constraint::Min(8),    // Status
    ];

    let table = Table::new(rows, widths).header(header).block(block);

    f.render_widget(table, area);
}
