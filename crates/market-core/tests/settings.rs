use market_core::{AssetCategory, MarketError, SimulationSettings};
use rand::Rng;

#[test]
fn empty_table_gives_defaults() {
    let settings: SimulationSettings = toml::from_str("").unwrap();
    assert_eq!(settings, SimulationSettings::default());
    assert_eq!(settings.tick_interval_ms, 3_000);
    assert_eq!(settings.recent_order_cap, 10);
    assert_eq!(settings.assets.len(), 8);
    settings.validate().unwrap();
}

#[test]
fn custom_universe_from_toml() {
    let settings: SimulationSettings = toml::from_str(
        r#"
        tick_interval_ms = 500
        seed = 11

        [[assets]]
        id = "ada-usdt"
        name = "Cardano"
        symbol = "ADA/USDT"
        price = 0.45
        change_24h = -3.1
        category = "crypto"

        [[assets]]
        id = "usdjpy"
        name = "USD/JPY"
        symbol = "USD/JPY"
        price = 155.321
        change_24h = 0.05
        category = "forex"
        "#,
    )
    .unwrap();

    settings.validate().unwrap();
    assert_eq!(settings.tick_interval().as_millis(), 500);

    let registry = settings.registry().unwrap();
    assert_eq!(registry.len(), 2);
    let jpy = registry.get("usdjpy").unwrap();
    assert_eq!(jpy.category, AssetCategory::Forex);
    assert_eq!(jpy.previous_price, None);
}

#[test]
fn unknown_keys_are_rejected() {
    let parsed: Result<SimulationSettings, _> = toml::from_str("tick_interval = 5");
    assert!(parsed.is_err());
}

#[test]
fn validation_catches_out_of_range_values() {
    let mut settings = SimulationSettings {
        tick_interval_ms: 0,
        ..SimulationSettings::default()
    };
    assert!(matches!(
        settings.validate(),
        Err(MarketError::InvalidSetting { name: "tick_interval_ms", .. })
    ));

    settings.tick_interval_ms = 1_000;
    settings.volatility_prompt_probability = 1.5;
    assert!(matches!(
        settings.validate(),
        Err(MarketError::InvalidSetting { name: "volatility_prompt_probability", .. })
    ));

    settings.volatility_prompt_probability = 0.2;
    settings.candle_count = 10_001;
    assert!(matches!(
        settings.validate(),
        Err(MarketError::InvalidSetting { name: "candle_count", .. })
    ));

    settings.candle_count = 10_000;
    settings.validate().unwrap();
    settings.assets[0].price = 0.0;
    assert!(matches!(
        settings.validate(),
        Err(MarketError::InvalidSetting { name: "assets", .. })
    ));
}

#[test]
fn seeded_sessions_repeat() {
    let settings = SimulationSettings {
        seed: Some(1234),
        ..SimulationSettings::default()
    };

    let mut a = settings.make_rng();
    let mut b = settings.make_rng();
    let xs: Vec<u64> = (0..8).map(|_| a.gen()).collect();
    let ys: Vec<u64> = (0..8).map(|_| b.gen()).collect();
    assert_eq!(xs, ys);
}
