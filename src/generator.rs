//! Mock dataset synthesis.
//!
//! A [`DatasetGenerator`] owns the only random source in the crate. Every
//! stochastic draw goes through it, so a seed plus a reference date fully
//! determines the resulting [`Dataset`].

use chrono::{Datelike, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Category, Contract, Dataset, RenewalType, RiskLevel, SpendHistoryEntry, Status, Vendor};

pub const ROSTER_SIZE: usize = 40;
pub const HISTORY_MONTHS: u32 = 36;
pub const NOTICE_PERIOD_DAYS: u32 = 90;

const NAME_ADJECTIVES: [&str; 5] = ["Global", "Strategic", "Prime", "First", "United"];
const NAME_NOUNS: [&str; 5] = ["Finance", "Solutions", "Partners", "Systems", "Group"];

pub const CONTRACT_START: NaiveDate = fixed_date(2023, 1, 1);
pub const CONTRACT_END_DATES: [NaiveDate; 4] = [
    fixed_date(2025, 6, 30),
    fixed_date(2026, 12, 31),
    fixed_date(2025, 12, 31),
    fixed_date(2024, 12, 31),
];

const fn fixed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid fixed calendar date"),
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output. A fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Day whose month ends the spend history. Defaults to today (UTC).
    pub as_of: Option<NaiveDate>,
}

pub struct DatasetGenerator {
    rng: StdRng,
    seed: u64,
    as_of: NaiveDate,
    months: Vec<NaiveDate>,
}

impl DatasetGenerator {
    pub fn new(config: GeneratorConfig) -> DashboardResult<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let as_of = config.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let months = month_window(as_of).ok_or(DashboardError::InvalidReferenceDate(as_of))?;
        debug!(seed, %as_of, "dataset generator ready");

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            as_of,
            months,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Builds vendors, spend history and contracts in one pass.
    pub fn generate(self) -> Dataset {
        self.generate_with_rng().0
    }

    /// Like [`generate`](Self::generate), but hands back the random source
    /// positioned after the last draw, for views that need further draws.
    pub fn generate_with_rng(mut self) -> (Dataset, StdRng) {
        let vendors = self.vendor_roster();
        let spend_history = self.spend_history();
        let contracts = self.contracts(&vendors);

        info!(
            seed = self.seed,
            vendors = vendors.len(),
            months = spend_history.len(),
            contracts = contracts.len(),
            "generated procurement dataset"
        );

        let dataset = Dataset {
            vendors,
            spend_history,
            contracts,
        };
        (dataset, self.rng)
    }

    fn vendor_roster(&mut self) -> Vec<Vendor> {
        let mut vendors = seed_vendors();
        for index in vendors.len() + 1..=ROSTER_SIZE {
            let vendor = self.synthesize_vendor(index);
            vendors.push(vendor);
        }
        vendors
    }

    fn synthesize_vendor(&mut self, index: usize) -> Vendor {
        let risk = risk_from_roll(self.rng.gen());
        let sla = round_tenths(90.0 + self.rng.gen::<f64>() * 9.9);
        let spend = self.rng.gen_range(100_000..=2_100_000);
        let trend = round_tenths(-5.0 + self.rng.gen::<f64>() * 15.0);
        let status = status_from_roll(self.rng.gen());

        Vendor {
            id: vendor_id(index),
            name: vendor_name(index),
            category: Category::cyclic(index),
            risk,
            sla,
            spend,
            trend,
            status,
        }
    }

    fn spend_history(&mut self) -> Vec<SpendHistoryEntry> {
        let months = std::mem::take(&mut self.months);
        let last = months.len().saturating_sub(1) as u32;

        let history = months
            .iter()
            .enumerate()
            .map(|(position, date)| {
                let months_back = last - position as u32;
                let mut entry = SpendHistoryEntry::empty(*date);
                for category in Category::ALL {
                    let base = self.rng.gen_range(500_000.0..=700_000.0);
                    entry.record(category, category_value(category, base, *date, months_back));
                }
                entry
            })
            .collect();

        self.months = months;
        history
    }

    fn contracts(&mut self, vendors: &[Vendor]) -> Vec<Contract> {
        vendors
            .iter()
            .map(|vendor| {
                let end_date = CONTRACT_END_DATES[self.rng.gen_range(0..CONTRACT_END_DATES.len())];
                let renewal_type = if self.rng.gen_bool(0.5) {
                    RenewalType::AutoRenew
                } else {
                    RenewalType::Manual
                };
                derive_contract(vendor, end_date, renewal_type)
            })
            .collect()
    }
}

/// Convenience wrapper for one-shot generation.
pub fn generate_dataset(config: GeneratorConfig) -> DashboardResult<Dataset> {
    Ok(DatasetGenerator::new(config)?.generate())
}

/// First-of-month dates for the history window, oldest first.
pub fn month_window(as_of: NaiveDate) -> Option<Vec<NaiveDate>> {
    let current = NaiveDate::from_ymd_opt(as_of.year(), as_of.month(), 1)?;
    (0..HISTORY_MONTHS)
        .rev()
        .map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

pub fn vendor_id(index: usize) -> String {
    format!("V-{index:03}")
}

// Adjective and noun share one modulus, so names repeat every five vendors.
pub fn vendor_name(index: usize) -> String {
    format!(
        "{} {}",
        NAME_ADJECTIVES[index % NAME_ADJECTIVES.len()],
        NAME_NOUNS[index % NAME_NOUNS.len()]
    )
}

pub fn risk_from_roll(roll: f64) -> RiskLevel {
    if roll > 0.8 {
        RiskLevel::High
    } else if roll > 0.6 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn status_from_roll(roll: f64) -> Status {
    if roll > 0.9 {
        Status::Expired
    } else if roll > 0.85 {
        Status::Review
    } else {
        Status::Active
    }
}

pub fn base_multiplier(category: Category) -> f64 {
    match category {
        Category::PaymentProcessing => 4.0,
        Category::CardNetworkFees => 2.5,
        _ => 1.0,
    }
}

/// Linear growth: 1.0 for the oldest month, rising 5% per year of history.
pub fn growth_factor(months_back: u32) -> f64 {
    let elapsed = (HISTORY_MONTHS - 1).saturating_sub(months_back) as f64;
    1.0 + 0.05 * elapsed / 12.0
}

pub fn seasonality(category: Category, date: NaiveDate) -> f64 {
    match (category, date.month()) {
        (Category::Insurance, 1) => 2.5,
        (Category::PaymentProcessing, 12) => 1.4,
        _ => 1.0,
    }
}

/// Monthly spend for one category given its sampled base draw.
pub fn category_value(category: Category, base: f64, date: NaiveDate, months_back: u32) -> u64 {
    let scaled = base * base_multiplier(category);
    (scaled * growth_factor(months_back) * seasonality(category, date)).round() as u64
}

/// Contracts carry their vendor's status; an Active vendor always yields an
/// Active contract.
pub fn contract_status(vendor: &Vendor) -> Status {
    vendor.status
}

pub fn derive_contract(vendor: &Vendor, end_date: NaiveDate, renewal_type: RenewalType) -> Contract {
    Contract {
        id: format!("CTR-{}", vendor.id_suffix()),
        vendor_id: vendor.id.clone(),
        vendor_name: vendor.name.clone(),
        category: vendor.category,
        value: vendor.spend,
        start_date: CONTRACT_START,
        end_date,
        status: contract_status(vendor),
        renewal_type,
        notice_period: NOTICE_PERIOD_DAYS,
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The hand-authored part of the roster.
pub fn seed_vendors() -> Vec<Vendor> {
    use Category::*;
    use RiskLevel::*;

    let seeds: [(&str, Category, RiskLevel, f64, u64, f64, Status); 13] = [
        ("Worldline", PaymentProcessing, Low, 99.8, 14_200_000, 12.4, Status::Active),
        ("Adyen", PaymentProcessing, Low, 99.9, 8_500_000, 18.2, Status::Active),
        ("SumUp", PaymentProcessing, Medium, 98.5, 1_200_000, 5.1, Status::Active),
        ("Deutsche Bank", BankingServices, Low, 99.5, 3_400_000, 2.1, Status::Active),
        ("Raiffeisen Bank", BankingServices, Low, 99.2, 2_100_000, 1.5, Status::Active),
        ("Allianz", Insurance, Low, 98.8, 6_800_000, 4.2, Status::Active),
        ("Zurich Insurance", Insurance, Medium, 97.9, 4_200_000, 3.8, Status::Review),
        ("Loomis", CashHandling, High, 94.2, 2_800_000, -2.4, Status::Warning),
        ("Brinks", CashHandling, Medium, 96.5, 3_100_000, -1.1, Status::Active),
        ("Visa Europe", CardNetworkFees, Low, 100.0, 8_900_000, 8.5, Status::Active),
        ("Mastercard", CardNetworkFees, Low, 100.0, 7_600_000, 7.9, Status::Active),
        ("KPMG", AuditCompliance, Low, 98.0, 1_500_000, 0.0, Status::Active),
        ("HSBC", TreasuryFx, Low, 99.1, 900_000, 1.2, Status::Active),
    ];

    seeds
        .into_iter()
        .enumerate()
        .map(|(position, (name, category, risk, sla, spend, trend, status))| Vendor {
            id: vendor_id(position + 1),
            name: name.to_string(),
            category,
            risk,
            sla,
            spend,
            trend,
            status,
        })
        .collect()
}
