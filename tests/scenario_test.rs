use gold_forecast::domain::scenario::{ScenarioAdjuster, ScenarioParameters, ScenarioPreset};

#[test]
fn test_combined_scenario_sums_impacts() {
    let params = ScenarioParameters {
        interest_rate_change: 2.0,
        inflation_change: 3.0,
        dollar_strength_change: -4.0,
        market_volatility: 20.0,
        geopolitical_risk: 10.0,
    };
    // -1.0% + 2.4% + 1.2% + 4.0% + 4.0% = +10.6%
    let adjusted = ScenarioAdjuster::adjust(&[2000.0, 1000.0], &params);
    assert!((adjusted[0] - 2212.0).abs() < 1e-9);
    assert!((adjusted[1] - 1106.0).abs() < 1e-9);
}

#[test]
fn test_adjustment_preserves_length_and_order() {
    let base: Vec<f64> = (0..30).map(|i| 1900.0 + i as f64 * 3.0).collect();
    let params = ScenarioPreset::InflationSpike.parameters();
    let adjusted = ScenarioAdjuster::adjust(&base, &params);

    assert_eq!(adjusted.len(), base.len());
    assert!(adjusted.windows(2).all(|w| w[0] < w[1]));
    assert!(adjusted.iter().zip(&base).all(|(a, b)| a > b));
}

#[test]
fn test_presets_move_price_in_expected_direction() {
    let price = 2000.0;
    let up = [
        ScenarioPreset::FedRateCut,
        ScenarioPreset::InflationSpike,
        ScenarioPreset::GeopoliticalTension,
        ScenarioPreset::TechSectorCrash,
    ];
    for preset in up {
        assert!(
            ScenarioAdjuster::adjust_price(price, &preset.parameters()) > price,
            "{preset} should raise the price"
        );
    }
    assert!(ScenarioAdjuster::adjust_price(price, &ScenarioPreset::DollarStrength.parameters()) < price);
}

#[test]
fn test_request_body_with_partial_parameters() {
    let params: ScenarioParameters =
        serde_json::from_str(r#"{"geopolitical_risk": 80, "market_volatility": 40}"#).unwrap();
    let adjusted = ScenarioAdjuster::adjust_price(1000.0, &params);
    // 0.4 * 80% + 0.2 * 40% = 40%
    assert!((adjusted - 1400.0).abs() < 1e-9);
}
