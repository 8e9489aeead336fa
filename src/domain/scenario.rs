//! Macro scenario adjustment of baseline forecasts.
//!
//! Each parameter carries a fixed linear sensitivity. The coefficients are
//! business constants and must not be recalibrated here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rate sensitivity, inverse relationship
pub const INTEREST_RATE_COEFFICIENT: f64 = -0.5;
/// Inflation sensitivity, direct relationship
pub const INFLATION_COEFFICIENT: f64 = 0.8;
/// USD strength sensitivity, inverse relationship
pub const DOLLAR_STRENGTH_COEFFICIENT: f64 = -0.3;
/// Volatility sensitivity (0-100 scale)
pub const MARKET_VOLATILITY_COEFFICIENT: f64 = 0.2;
/// Geopolitical risk sensitivity (0-100 scale)
pub const GEOPOLITICAL_RISK_COEFFICIENT: f64 = 0.4;

/// Scenario inputs for one adjustment call. Missing fields default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Percentage points
    pub interest_rate_change: f64,
    /// Percentage points
    pub inflation_change: f64,
    /// Percent
    pub dollar_strength_change: f64,
    /// 0-100 scale
    pub market_volatility: f64,
    /// 0-100 scale
    pub geopolitical_risk: f64,
}

impl ScenarioParameters {
    /// Relative price impact: the fraction of the base price added by this scenario.
    pub fn impact_factor(&self) -> f64 {
        (INTEREST_RATE_COEFFICIENT * self.interest_rate_change
            + INFLATION_COEFFICIENT * self.inflation_change
            + DOLLAR_STRENGTH_COEFFICIENT * self.dollar_strength_change
            + MARKET_VOLATILITY_COEFFICIENT * self.market_volatility
            + GEOPOLITICAL_RISK_COEFFICIENT * self.geopolitical_risk)
            / 100.0
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Applies scenario parameters to baseline forecasts.
pub struct ScenarioAdjuster;

impl ScenarioAdjuster {
    /// Adjusts each price independently and clamps the result at zero.
    pub fn adjust(base: &[f64], params: &ScenarioParameters) -> Vec<f64> {
        base.iter()
            .map(|&price| Self::adjust_price(price, params))
            .collect()
    }

    pub fn adjust_price(price: f64, params: &ScenarioParameters) -> f64 {
        let p = params;
        let impact = INTEREST_RATE_COEFFICIENT * p.interest_rate_change / 100.0 * price
            + INFLATION_COEFFICIENT * p.inflation_change / 100.0 * price
            + DOLLAR_STRENGTH_COEFFICIENT * p.dollar_strength_change / 100.0 * price
            + MARKET_VOLATILITY_COEFFICIENT * p.market_volatility / 100.0 * price
            + GEOPOLITICAL_RISK_COEFFICIENT * p.geopolitical_risk / 100.0 * price;
        (price + impact).max(0.0)
    }
}

/// Named macro scenarios offered to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    FedRateCut,
    InflationSpike,
    DollarStrength,
    GeopoliticalTension,
    TechSectorCrash,
}

impl ScenarioPreset {
    pub fn all() -> Vec<ScenarioPreset> {
        vec![
            ScenarioPreset::FedRateCut,
            ScenarioPreset::InflationSpike,
            ScenarioPreset::DollarStrength,
            ScenarioPreset::GeopoliticalTension,
            ScenarioPreset::TechSectorCrash,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScenarioPreset::FedRateCut => "Federal Reserve cuts interest rates by 0.5%",
            ScenarioPreset::InflationSpike => "CPI rises above 4% unexpectedly",
            ScenarioPreset::DollarStrength => "USD strengthens significantly vs major currencies",
            ScenarioPreset::GeopoliticalTension => "Escalation in global conflict zones",
            ScenarioPreset::TechSectorCrash => "Major tech stocks decline 15%+",
        }
    }

    pub fn parameters(&self) -> ScenarioParameters {
        match self {
            ScenarioPreset::FedRateCut => ScenarioParameters {
                interest_rate_change: -0.5,
                ..Default::default()
            },
            ScenarioPreset::InflationSpike => ScenarioParameters {
                inflation_change: 1.5,
                market_volatility: 10.0,
                ..Default::default()
            },
            ScenarioPreset::DollarStrength => ScenarioParameters {
                dollar_strength_change: 5.0,
                ..Default::default()
            },
            ScenarioPreset::GeopoliticalTension => ScenarioParameters {
                market_volatility: 30.0,
                geopolitical_risk: 60.0,
                ..Default::default()
            },
            ScenarioPreset::TechSectorCrash => ScenarioParameters {
                interest_rate_change: -0.25,
                market_volatility: 70.0,
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioPreset::FedRateCut => "fed_rate_cut",
            ScenarioPreset::InflationSpike => "inflation_spike",
            ScenarioPreset::DollarStrength => "dollar_strength",
            ScenarioPreset::GeopoliticalTension => "geopolitical_tension",
            ScenarioPreset::TechSectorCrash => "tech_sector_crash",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ScenarioPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioPreset::all()
            .into_iter()
            .find(|preset| preset.to_string() == s.to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Unknown scenario preset: {}", s))
    }
}
