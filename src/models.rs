use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Procurement categories, in the order the dashboard lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Payment Processing")]
    PaymentProcessing,
    #[serde(rename = "Banking Services")]
    BankingServices,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Card Network Fees")]
    CardNetworkFees,
    #[serde(rename = "Cash Handling & CIT")]
    CashHandling,
    #[serde(rename = "Treasury & FX")]
    TreasuryFx,
    #[serde(rename = "Audit & Compliance")]
    AuditCompliance,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::PaymentProcessing,
        Category::BankingServices,
        Category::Insurance,
        Category::CardNetworkFees,
        Category::CashHandling,
        Category::TreasuryFx,
        Category::AuditCompliance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::PaymentProcessing => "Payment Processing",
            Category::BankingServices => "Banking Services",
            Category::Insurance => "Insurance",
            Category::CardNetworkFees => "Card Network Fees",
            Category::CashHandling => "Cash Handling & CIT",
            Category::TreasuryFx => "Treasury & FX",
            Category::AuditCompliance => "Audit & Compliance",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cyclic pick used when synthesizing vendors.
    pub fn cyclic(index: usize) -> Category {
        Category::ALL[index % Category::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Lifecycle status shared by vendors and their contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Review,
    Warning,
    Expired,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "Active"),
            Status::Review => write!(f, "Review"),
            Status::Warning => write!(f, "Warning"),
            Status::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewalType {
    #[serde(rename = "Auto-renew")]
    AutoRenew,
    Manual,
}

impl fmt::Display for RenewalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenewalType::AutoRenew => write!(f, "Auto-renew"),
            RenewalType::Manual => write!(f, "Manual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub risk: RiskLevel,
    pub sla: f64,
    pub spend: u64,
    pub trend: f64,
    pub status: Status,
}

impl Vendor {
    /// Numeric part of the id, e.g. `"020"` for `V-020`.
    pub fn id_suffix(&self) -> &str {
        self.id.strip_prefix("V-").unwrap_or(&self.id)
    }
}

/// One month of spend. Category columns are flat so the record serializes
/// the same way to JSON and CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendHistoryEntry {
    pub date: NaiveDate,
    pub display_date: String,
    pub total: u64,
    #[serde(rename = "Payment Processing")]
    pub payment_processing: u64,
    #[serde(rename = "Banking Services")]
    pub banking_services: u64,
    #[serde(rename = "Insurance")]
    pub insurance: u64,
    #[serde(rename = "Card Network Fees")]
    pub card_network_fees: u64,
    #[serde(rename = "Cash Handling & CIT")]
    pub cash_handling: u64,
    #[serde(rename = "Treasury & FX")]
    pub treasury_fx: u64,
    #[serde(rename = "Audit & Compliance")]
    pub audit_compliance: u64,
}

impl SpendHistoryEntry {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            display_date: date.format("%b %y").to_string(),
            total: 0,
            payment_processing: 0,
            banking_services: 0,
            insurance: 0,
            card_network_fees: 0,
            cash_handling: 0,
            treasury_fx: 0,
            audit_compliance: 0,
        }
    }

    pub fn value(&self, category: Category) -> u64 {
        match category {
            Category::PaymentProcessing => self.payment_processing,
            Category::BankingServices => self.banking_services,
            Category::Insurance => self.insurance,
            Category::CardNetworkFees => self.card_network_fees,
            Category::CashHandling => self.cash_handling,
            Category::TreasuryFx => self.treasury_fx,
            Category::AuditCompliance => self.audit_compliance,
        }
    }

    fn value_mut(&mut self, category: Category) -> &mut u64 {
        match category {
            Category::PaymentProcessing => &mut self.payment_processing,
            Category::BankingServices => &mut self.banking_services,
            Category::Insurance => &mut self.insurance,
            Category::CardNetworkFees => &mut self.card_network_fees,
            Category::CashHandling => &mut self.cash_handling,
            Category::TreasuryFx => &mut self.treasury_fx,
            Category::AuditCompliance => &mut self.audit_compliance,
        }
    }

    /// Stores a category value and keeps `total` in step.
    pub fn record(&mut self, category: Category, value: u64) {
        let slot = self.value_mut(category);
        let previous = *slot;
        *slot = value;
        self.total = self.total - previous + value;
    }

    pub fn category_sum(&self) -> u64 {
        Category::ALL.iter().map(|c| self.value(*c)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub category: Category,
    pub value: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Status,
    pub renewal_type: RenewalType,
    pub notice_period: u32,
}

/// Everything the dashboard displays, built once and then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub vendors: Vec<Vendor>,
    pub spend_history: Vec<SpendHistoryEntry>,
    pub contracts: Vec<Contract>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub value: u64,
}
