// crates/market-core/tests/dashboard_scenarios.rs
use chrono::{Local, TimeZone, Utc};
use market_core::{
    default_assets, Asset, AssetCategory, AssetFilter, AssetRegistry, CandleGenerator,
    CategoryFilter, ChartState, Dashboard, DashboardEvent, Direction, MarketError, OrderForm,
    OrderId, OrderStatus, OrderUpdate, PanelMessage, PriceTicker, Timeframe,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn registry() -> AssetRegistry {
    AssetRegistry::new(default_assets()).expect("default universe is valid")
}

fn decimals_of(formatted: &str) -> usize {
    formatted.split('.').nth(1).map(str::len).unwrap_or(0)
}

fn draft_for(asset: &Asset, amount: f64) -> market_core::OrderDraft {
    let mut form = OrderForm::default();
    form.set_amount_input(&amount.to_string()).unwrap();
    form.draft(Some(asset)).unwrap()
}

#[test]
fn ticks_keep_category_precision() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let ticker = PriceTicker::default();
    let mut registry = registry();

    for _ in 0..250 {
        let next = ticker.tick(&registry, &mut rng);
        registry.replace_all(next);

        for asset in registry.iter() {
            let expected = match asset.category {
                AssetCategory::Forex => 4,
                _ => 2,
            };
            assert_eq!(
                decimals_of(&asset.formatted_price()),
                expected,
                "{} rendered as {}",
                asset.symbol,
                asset.formatted_price()
            );

            // The stored value itself is rounded, not just the display.
            let factor = 10f64.powi(expected as i32);
            assert!(((asset.price * factor).round() / factor - asset.price).abs() < 1e-9);
            assert!(asset.previous_price.is_some());
        }
    }

    assert_eq!(registry.len(), 8);
}

#[test]
fn recent_orders_never_exceed_cap() {
    let mut dashboard = Dashboard::default();
    let btc = registry().get("btc-usdt").cloned().unwrap();
    dashboard.select_asset(btc.clone());

    for i in 0..37 {
        let events = dashboard.process_message(PanelMessage::PlaceOrder(draft_for(&btc, 10.0)));
        assert!(matches!(events.as_slice(), [DashboardEvent::OrderPlaced(_)]));
        assert_eq!(dashboard.order_count(), (i + 1).min(10));
    }

    assert_eq!(dashboard.order_cap(), 10);
    assert_eq!(dashboard.orders().count(), 10);
}

#[test]
fn most_recent_order_comes_first() {
    let mut dashboard = Dashboard::default();
    let registry = registry();
    let aapl = registry.get("aapl").unwrap();
    let msft = registry.get("msft").unwrap();

    let t0 = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let first = dashboard.place_order_at(draft_for(aapl, 100.0), t0).id.clone();
    let second = dashboard.place_order_at(draft_for(msft, 100.0), t0).id.clone();

    assert_ne!(first, second);
    let symbols: Vec<&str> = dashboard.orders().map(|o| o.asset_symbol.as_str()).collect();
    assert_eq!(symbols, ["MSFT", "AAPL"]);
    assert!(dashboard.orders().all(|o| o.status == OrderStatus::Executed));
    assert!(first.as_str().starts_with(&format!("order-{}-", t0.timestamp_millis())));
}

#[test]
fn placing_without_asset_leaves_orders_unchanged() {
    let dashboard = Dashboard::default();
    let form = OrderForm::default();

    let result = form.draft(dashboard.selected_asset());

    assert_eq!(result, Err(MarketError::NoAssetSelected));
    assert_eq!(dashboard.order_count(), 0);
    assert_eq!(dashboard.balance(), 10_000.0);
}

#[test]
fn balance_is_debited_without_floor() {
    let mut dashboard = Dashboard::new(150.0, 10);
    let gold = registry().get("gold").cloned().unwrap();

    dashboard.place_order(draft_for(&gold, 100.0));
    let mut sell = draft_for(&gold, 100.0);
    sell.direction = Direction::Sell;
    dashboard.place_order(sell);

    // Sells debit too; nothing stops the balance going negative.
    assert_eq!(dashboard.balance(), -50.0);
}

#[test]
fn update_order_merges_fields() {
    let mut dashboard = Dashboard::default();
    let eth = registry().get("eth-usdt").cloned().unwrap();
    let id = dashboard.place_order(draft_for(&eth, 250.0)).id.clone();

    let update = OrderUpdate {
        take_profit: Some(Some(3200.0)),
        status: Some(OrderStatus::Cancelled),
        ..OrderUpdate::default()
    };
    let events = dashboard.process_message(PanelMessage::update_order(id.clone(), update));

    let [DashboardEvent::OrderUpdated(order)] = events.as_slice() else {
        panic!("unexpected events: {events:?}");
    };
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(order.take_profit, Some(3200.0));
    assert_eq!(order.amount, 250.0);
    assert_eq!(order.stop_loss, None);
    assert_eq!(dashboard.order(&id).unwrap().status, OrderStatus::Cancelled);
}

#[test]
fn update_can_clear_a_stop_level() {
    let mut dashboard = Dashboard::default();
    let aapl = registry().get("aapl").cloned().unwrap();

    let mut form = OrderForm::default();
    form.toggle_take_profit(aapl.price);
    form.toggle_stop_loss(aapl.price);
    let id = dashboard.place_order(form.draft(Some(&aapl)).unwrap()).id.clone();
    assert!(dashboard.order(&id).unwrap().stop_loss.is_some());

    let update = OrderUpdate {
        stop_loss: Some(None),
        ..OrderUpdate::default()
    };
    let events = dashboard.process_message(PanelMessage::update_order(id.clone(), update));
    assert!(matches!(events.as_slice(), [DashboardEvent::OrderUpdated(_)]));

    let order = dashboard.order(&id).unwrap();
    assert_eq!(order.stop_loss, None);
    // Untouched fields survive the merge.
    assert!(order.take_profit.is_some());
    assert_eq!(order.status, OrderStatus::Executed);
}

#[test]
fn update_of_unknown_order_is_rejected() {
    let mut dashboard = Dashboard::default();
    let ghost = OrderId::new("order-0-99");

    let events = dashboard.process_message(PanelMessage::update_order(
        ghost.clone(),
        OrderUpdate::status(OrderStatus::Cancelled),
    ));

    assert_eq!(
        events,
        vec![DashboardEvent::Rejected(MarketError::UnknownOrder(ghost))]
    );
    assert_eq!(dashboard.order_count(), 0);
}

#[test]
fn switching_timeframe_replaces_series() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let generator = CandleGenerator::default();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let asset = registry().get("sol-usdt").cloned().unwrap();

    let mut chart = ChartState::default();
    let ticket = chart.request(&asset);
    let first = generator.generate(ticket.base_price, 100, ticket.timeframe, now, &mut rng);
    chart.finish(ticket.generation, first.clone()).unwrap();
    assert_eq!(chart.candles().len(), 100);

    let ticket = chart.set_timeframe(Timeframe::OneHour).expect("asset is shown");
    assert!(chart.is_loading());
    let second = generator.generate(ticket.base_price, 100, ticket.timeframe, now, &mut rng);
    chart.finish(ticket.generation, second).unwrap();

    let candles = chart.candles();
    assert_eq!(candles.len(), 100);
    assert_ne!(candles, first.as_slice());
    for pair in candles.windows(2) {
        assert_eq!((pair[1].timestamp - pair[0].timestamp).num_seconds(), 3_600);
    }
    assert_eq!(candles.last().unwrap().timestamp, now);
}

#[test]
fn superseded_load_is_discarded() {
    let asset = registry().get("aapl").cloned().unwrap();
    let mut chart = ChartState::default();

    let stale = chart.request(&asset);
    let current = chart.set_timeframe(Timeframe::FiveMinutes).unwrap();

    let err = chart.finish(stale.generation, Vec::new()).unwrap_err();
    assert_eq!(
        err,
        MarketError::StaleChartLoad {
            generation: stale.generation,
            current: current.generation,
        }
    );
    assert!(chart.is_loading());

    chart.cancel();
    assert!(!chart.is_loading());
    assert!(chart.finish(current.generation, Vec::new()).is_err());
}

#[test]
fn timeframe_without_asset_does_not_load() {
    let mut chart = ChartState::default();
    assert!(chart.set_timeframe(Timeframe::OneDay).is_none());
    assert_eq!(chart.timeframe(), Timeframe::OneDay);
    assert!(!chart.is_loading());
}

#[test]
fn category_filter_only_returns_that_category() {
    let registry = registry();

    for category in AssetCategory::ALL {
        let filter = AssetFilter::new("", CategoryFilter::Only(category));
        let visible = filter.apply(&registry);
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|asset| asset.category == category));
    }

    let all = AssetFilter::default().apply(&registry);
    assert_eq!(all.len(), registry.len());
}

#[test]
fn search_matches_name_or_symbol_case_insensitively() {
    let registry = registry();

    let by_name: Vec<&str> = AssetFilter::new("bit", CategoryFilter::All)
        .apply(&registry)
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(by_name, ["btc-usdt"]);

    let by_symbol: Vec<&str> = AssetFilter::new("usd", CategoryFilter::Only(AssetCategory::Forex))
        .apply(&registry)
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(by_symbol, ["eurusd", "gbpusd", "gold"]);
}

#[test]
fn unmatched_search_yields_empty_list() {
    let registry = registry();
    let filter = AssetFilter::new("dogecoin", CategoryFilter::All);
    assert!(filter.apply(&registry).is_empty());
}

#[test]
fn registry_rejects_bad_universes() {
    assert_eq!(
        AssetRegistry::new(Vec::new()).unwrap_err(),
        MarketError::EmptyUniverse
    );

    let mut assets = default_assets();
    assets.push(assets[0].clone());
    assert_eq!(
        AssetRegistry::new(assets).unwrap_err(),
        MarketError::DuplicateAsset("btc-usdt".to_string())
    );
}
