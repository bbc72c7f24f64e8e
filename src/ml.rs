//! Pre-baked model summaries shown on the analytics cards.
//!
//! Nothing here is trained or fitted; the figures are fixed.

use chrono::NaiveDate;
use serde::Serialize;

pub const FORECAST_YEAR: i32 = 2026;
const FORECAST_BASE: f64 = 4_800_000.0;
const FORECAST_MONTHLY_DRIFT: f64 = 0.008;
const CONFIDENCE_SPREAD: f64 = 0.05;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub month: String,
    pub value: f64,
    pub confidence: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArimaSummary {
    pub name: &'static str,
    pub train_period: &'static str,
    pub rmse: u64,
    pub mape: f64,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub name: &'static str,
    pub importance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomForestSummary {
    pub accuracy: f64,
    pub f1: f64,
    pub features: Vec<FeatureImportance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    pub name: &'static str,
    pub coef: f64,
    pub p: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionSummary {
    pub r2: f64,
    pub p_val: &'static str,
    pub coefficients: Vec<Coefficient>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummaries {
    pub arima: ArimaSummary,
    pub random_forest: RandomForestSummary,
    pub regression: RegressionSummary,
}

pub fn model_summaries() -> ModelSummaries {
    ModelSummaries {
        arima: ArimaSummary {
            name: "ARIMA(2,1,1)",
            train_period: "Jan 2023 - Dec 2025",
            rmse: 142_300,
            mape: 3.2,
            forecast: arima_forecast(),
        },
        random_forest: RandomForestSummary {
            accuracy: 89.3,
            f1: 0.87,
            features: [
                ("SLA History", 0.35),
                ("Payment Error Freq", 0.28),
                ("Response Time", 0.15),
                ("Contract Value", 0.12),
                ("Relationship Yrs", 0.06),
                ("Countries Served", 0.04),
            ]
            .into_iter()
            .map(|(name, importance)| FeatureImportance { name, importance })
            .collect(),
        },
        regression: RegressionSummary {
            r2: 0.91,
            p_val: "< 0.001",
            coefficients: [
                ("Transaction Vol", 0.43, 0.001),
                ("Store Count", 0.31, 0.004),
                ("Contract Age", -0.12, 0.021),
                ("Inflation Rate", 0.08, 0.15),
            ]
            .into_iter()
            .map(|(name, coef, p)| Coefficient { name, coef, p })
            .collect(),
        },
    }
}

/// Twelve monthly points with a slight upward drift and a +/-5% band.
pub fn arima_forecast() -> Vec<ForecastPoint> {
    (1..=12u32)
        .filter_map(|month| NaiveDate::from_ymd_opt(FORECAST_YEAR, month, 1))
        .enumerate()
        .map(|(step, date)| {
            let value = FORECAST_BASE * (1.0 + step as f64 * FORECAST_MONTHLY_DRIFT);
            ForecastPoint {
                month: date.format("%b %y").to_string(),
                value,
                confidence: (value * (1.0 - CONFIDENCE_SPREAD), value * (1.0 + CONFIDENCE_SPREAD)),
            }
        })
        .collect()
}
