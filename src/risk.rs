use rand::Rng;
use serde::Serialize;

use crate::models::{RiskLevel, Vendor};

/// Spend that maps to an impact of 100 on the matrix.
pub const IMPACT_CEILING: f64 = 15_000_000.0;
pub const CRITICAL_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Serialize)]
pub struct RiskPoint {
    pub vendor_id: String,
    pub vendor_name: String,
    pub risk: RiskLevel,
    pub likelihood: f64,
    pub impact: f64,
    pub size: u64,
}

impl RiskPoint {
    pub fn is_critical(&self) -> bool {
        self.likelihood > CRITICAL_THRESHOLD && self.impact > CRITICAL_THRESHOLD
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Half-open likelihood band (percent) for each risk tier.
pub fn likelihood_band(risk: RiskLevel) -> (f64, f64) {
    match risk {
        RiskLevel::High => (60.0, 90.0),
        RiskLevel::Medium => (30.0, 60.0),
        RiskLevel::Low => (0.0, 30.0),
    }
}

pub fn impact(spend: u64) -> f64 {
    spend as f64 / IMPACT_CEILING * 100.0
}

/// Places every vendor on the likelihood/impact matrix, critical points first.
pub fn risk_matrix<R: Rng + ?Sized>(vendors: &[Vendor], rng: &mut R) -> Vec<RiskPoint> {
    let mut points: Vec<RiskPoint> = vendors
        .iter()
        .map(|vendor| {
            let (low, high) = likelihood_band(vendor.risk);
            RiskPoint {
                vendor_id: vendor.id.clone(),
                vendor_name: vendor.name.clone(),
                risk: vendor.risk,
                likelihood: rng.gen_range(low..high),
                impact: impact(vendor.spend),
                size: vendor.spend,
            }
        })
        .collect();

    points.sort_by(|a, b| {
        b.is_critical()
            .cmp(&a.is_critical())
            .then(b.impact.partial_cmp(&a.impact).unwrap_or(std::cmp::Ordering::Equal))
    });
    points
}

pub fn risk_distribution(vendors: &[Vendor]) -> RiskDistribution {
    vendors
        .iter()
        .fold(RiskDistribution::default(), |mut counts, vendor| {
            match vendor.risk {
                RiskLevel::Low => counts.low += 1,
                RiskLevel::Medium => counts.medium += 1,
                RiskLevel::High => counts.high += 1,
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generator::seed_vendors;

    #[test]
    fn bands_follow_expected_tiers() {
        assert_eq!(likelihood_band(RiskLevel::High), (60.0, 90.0));
        assert_eq!(likelihood_band(RiskLevel::Medium), (30.0, 60.0));
        assert_eq!(likelihood_band(RiskLevel::Low), (0.0, 30.0));
    }

    #[test]
    fn impact_scales_against_ceiling() {
        assert_eq!(impact(15_000_000), 100.0);
        assert_eq!(impact(7_500_000), 50.0);
        assert_eq!(impact(0), 0.0);
    }

    #[test]
    fn likelihood_stays_inside_band() {
        let vendors = seed_vendors();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            for point in risk_matrix(&vendors, &mut rng) {
                let (low, high) = likelihood_band(point.risk);
                assert!(point.likelihood >= low && point.likelihood < high);
            }
        }
    }

    #[test]
    fn low_risk_vendors_are_never_critical() {
        let vendors = seed_vendors();
        let mut rng = StdRng::seed_from_u64(9);
        let points = risk_matrix(&vendors, &mut rng);
        assert_eq!(points.len(), vendors.len());
        let worldline = points.iter().find(|p| p.vendor_name == "Worldline").unwrap();
        assert!(worldline.impact > 90.0);
        assert!(!worldline.is_critical());
    }

    #[test]
    fn distribution_counts_each_tier() {
        let counts = risk_distribution(&seed_vendors());
        assert_eq!(
            counts,
            RiskDistribution {
                low: 9,
                medium: 3,
                high: 1
            }
        );
    }
}
