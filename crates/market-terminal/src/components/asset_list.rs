// crates/market-terminal/src/components/asset_list.rs

use market_core::{AssetCategory, CategoryFilter, PriceMove};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::app::{App, Field, InputMode, Panel};
use crate::components::panel_border;

const CATEGORY_TABS: [CategoryFilter; 4] = [
    CategoryFilter::All,
    CategoryFilter::Only(AssetCategory::Crypto),
    CategoryFilter::Only(AssetCategory::Stocks),
    CategoryFilter::Only(AssetCategory::Forex),
];

pub fn draw_asset_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Markets ")
        .borders(Borders::ALL)
        .border_style(panel_border(app, Panel::Assets));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search
            Constraint::Length(2), // Category tabs
            Constraint::Min(3),    // Table
        ])
        .split(inner);

    draw_search(f, chunks[0], app);
    draw_tabs(f, chunks[1], app);

    let visible = app.visible_assets();
    if visible.is_empty() {
        let text = if app.filter.query.is_empty() {
            "No assets in this category".to_string()
        } else {
            format!("No assets found for \"{}\"", app.filter.query)
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(empty, chunks[2]);
        return;
    }

    let header = Row::new(vec!["Symbol", "Name", "Price", "24h"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let selected_id = app.dashboard.selected_asset().map(|asset| asset.id.as_str());

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let mut style = Style::default();
            if i == app.selected_row && app.current_panel == Panel::Assets {
                style = style.bg(Color::DarkGray);
            }
            if selected_id == Some(asset.id.as_str()) {
                style = style.add_modifier(Modifier::BOLD);
            }

            let price_style = match asset.price_move() {
                PriceMove::Up => style.fg(Color::Green),
                PriceMove::Down => style.fg(Color::Red),
                PriceMove::Flat => style,
            };
            let change_style = if asset.change_24h >= 0.0 {
                style.fg(Color::Green)
            } else {
                style.fg(Color::Red)
            };

            Row::new(vec![
                Cell::from(asset.symbol.clone()).style(style.fg(Color::Cyan)),
                Cell::from(asset.name.clone()).style(style),
                Cell::from(asset.formatted_price()).style(price_style),
                Cell::from(asset.formatted_change()).style(change_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Min(4),
        Constraint::Length(10),
        Constraint::Length(7),
    ];

    // Keeps the highlighted row in view on long lists.
    let mut state = TableState::default().with_selected(Some(app.selected_row));

    let table = Table::new(rows, widths).header(header);
    f.render_stateful_widget(table, chunks[2], &mut state);
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing(Field::Search);

    let line = if editing {
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if app.filter.query.is_empty() {
        Line::from(Span::styled("[/] Search assets", Style::default().fg(Color::Gray)))
    } else {
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(app.filter.query.as_str(), Style::default().fg(Color::Cyan)),
        ])
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = CATEGORY_TABS
        .iter()
        .map(|tab| match tab {
            CategoryFilter::All => Line::from("All"),
            CategoryFilter::Only(category) => Line::from(category.label()),
        })
        .collect();

    let selected = CATEGORY_TABS
        .iter()
        .position(|tab| *tab == app.filter.category)
        .unwrap_or_default();

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::BOTTOM))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}
