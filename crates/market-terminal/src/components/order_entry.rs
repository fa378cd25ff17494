use market_core::asset::format_price;
use market_core::order_form::{OrderForm, MIN_ORDER_AMOUNT};
use market_core::Direction as Side;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Field, InputMode, Panel};
use crate::components::panel_border;

pub fn draw_order_entry(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Place Order ")
        .borders(Borders::ALL)
        .border_style(panel_border(app, Panel::Orders));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(asset) = app.dashboard.selected_asset() else {
        let hint = Paragraph::new("Select an asset to start trading")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(hint, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Side selection
            Constraint::Length(2), // Amount
            Constraint::Length(2), // Take profit
            Constraint::Length(2), // Stop loss
            Constraint::Min(3),    // Summary
            Constraint::Length(1), // Actions
        ])
        .split(inner);

    let form = &app.form;

    // Side selection
    let (buy_style, sell_style) = match form.direction() {
        Side::Buy => (
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Gray),
        ),
        Side::Sell => (
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };
    let side_text = Line::from(vec![
        Span::styled(" [B]uy ", buy_style),
        Span::raw("  "),
        Span::styled(" [S]ell ", sell_style),
    ]);
    f.render_widget(
        Paragraph::new(side_text).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    // Amount
    let amount = field_line(
        app,
        Field::Amount,
        "Amount: $",
        format!("{}", form.amount()),
        "[+/-] [A]",
    );
    f.render_widget(
        Paragraph::new(amount).block(Block::default().borders(Borders::BOTTOM)),
        chunks[1],
    );

    // Stop levels
    let decimals = |price: f64| format_price(price, asset.category);
    let take_profit = field_line(
        app,
        Field::TakeProfit,
        "Take profit: ",
        form.take_profit().map(decimals).unwrap_or_else(|| "off".to_string()),
        "[p] [P]",
    );
    f.render_widget(
        Paragraph::new(take_profit).block(Block::default().borders(Borders::BOTTOM)),
        chunks[2],
    );

    let stop_loss = field_line(
        app,
        Field::StopLoss,
        "Stop loss: ",
        form.stop_loss().map(decimals).unwrap_or_else(|| "off".to_string()),
        "[l] [L]",
    );
    f.render_widget(
        Paragraph::new(stop_loss).block(Block::default().borders(Borders::BOTTOM)),
        chunks[3],
    );

    // Summary
    let balance = app.dashboard.balance();
    let summary_items = vec![
        ListItem::new(format!("Asset: {}", asset.symbol)),
        ListItem::new(format!("Price: {}", asset.formatted_price())),
        ListItem::new(format!(
            "Limits: {} - {}",
            MIN_ORDER_AMOUNT,
            OrderForm::max_amount(balance)
        )),
        ListItem::new(Line::from(vec![
            Span::raw("Balance: "),
            Span::styled(
                format!("${balance:.2}"),
                Style::default().fg(if balance < 0.0 { Color::Red } else { Color::White }),
            ),
        ])),
    ];
    f.render_widget(List::new(summary_items), chunks[4]);

    // Actions
    let action = match (form.direction(), app.input_mode) {
        (_, InputMode::Editing(_)) => "[Enter] Apply | [Esc] Cancel".to_string(),
        (side, _) => format!("[O] {} {}", if side == Side::Buy { "Buy" } else { "Sell" }, asset.symbol),
    };
    let actions = Paragraph::new(action)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(actions, chunks[5]);
}

fn field_line(app: &App, field: Field, label: &str, value: String, keys: &str) -> Line<'static> {
    if app.input_mode == InputMode::Editing(field) {
        return Line::from(vec![
            Span::raw(label.to_string()),
            Span::styled(app.input_buffer.clone(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
    }

    Line::from(vec![
        Span::raw(label.to_string()),
        Span::styled(value, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(keys.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}
