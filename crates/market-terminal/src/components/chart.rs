// crates/market-terminal/src/components/chart.rs

use chrono::Utc;
use market_core::asset::format_price;
use market_core::{Candle, Direction as Side, Order, Timeframe};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment},
        Block, Borders, Paragraph, Tabs,
    },
    Frame,
};

use crate::app::{App, Panel};
use crate::components::panel_border;

pub fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.chart.subject() {
        Some(asset) => format!(" {} ({}) - {} ", asset.name, asset.symbol, app.chart.timeframe()),
        None => " Chart ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(panel_border(app, Panel::Chart));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Timeframe buttons
            Constraint::Min(5),    // Candles
        ])
        .split(inner);

    draw_timeframes(f, chunks[0], app.chart.timeframe());

    let Some(asset) = app.chart.subject() else {
        draw_placeholder(f, chunks[1], "Select an asset to view chart");
        return;
    };

    if app.chart.is_loading() {
        draw_placeholder(f, chunks[1], "Loading chart...");
        return;
    }

    let candles = app.chart.candles();
    let Some((low, high)) = app.chart.price_bounds() else {
        draw_placeholder(f, chunks[1], "No chart data");
        return;
    };

    let pad = ((high - low) * 0.05).max(asset.price * 0.001);
    let (y_min, y_max) = (low - pad, high + pad);
    let x_max = candles.len() as f64;

    let markers: Vec<(f64, f64, Side)> = app
        .dashboard
        .orders()
        .filter(|order| order.asset_id == asset.id)
        .map(|order| (marker_x(candles, order), order.price, order.direction))
        .collect();

    let category = asset.category;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, x_max])
        .y_bounds([y_min, y_max])
        .paint(move |ctx| {
            for (i, candle) in candles.iter().enumerate() {
                let x = i as f64 + 0.5;
                let color = if candle.is_bullish() { Color::Green } else { Color::Red };

                ctx.draw(&Segment {
                    x1: x,
                    y1: candle.low,
                    x2: x,
                    y2: candle.high,
                    color: Color::DarkGray,
                });
                // body, drawn twice for width
                for dx in [-0.15, 0.15] {
                    ctx.draw(&Segment {
                        x1: x + dx,
                        y1: candle.open,
                        x2: x + dx,
                        y2: candle.close,
                        color,
                    });
                }
            }

            ctx.layer();

            for (x, price, side) in &markers {
                let color = match side {
                    Side::Buy => Color::Green,
                    Side::Sell => Color::Red,
                };
                let glyph = match side {
                    Side::Buy => "▲",
                    Side::Sell => "▼",
                };
                ctx.print(
                    *x,
                    *price,
                    Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                );
            }

            ctx.print(
                0.0,
                y_max,
                Span::styled(format_price(high, category), Style::default().fg(Color::Gray)),
            );
            ctx.print(
                0.0,
                y_min,
                Span::styled(format_price(low, category), Style::default().fg(Color::Gray)),
            );
        });

    f.render_widget(canvas, chunks[1]);
}

/// Column of the bar an order falls in; orders newer than the series
/// sit on the last bar.
fn marker_x(candles: &[Candle], order: &Order) -> f64 {
    let placed = order.timestamp.with_timezone(&Utc);
    let index = candles
        .iter()
        .rposition(|candle| candle.timestamp <= placed)
        .unwrap_or_default();
    index as f64 + 0.5
}

fn draw_timeframes(f: &mut Frame, area: Rect, current: Timeframe) {
    let titles: Vec<Line> = Timeframe::ALL.iter().map(|tf| Line::from(tf.label())).collect();

    let tabs = Tabs::new(titles)
        .select(current.index())
        .block(Block::default().borders(Borders::BOTTOM))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
