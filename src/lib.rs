//! Mock data core for the procurement analytics dashboard.
//!
//! [`generator`] builds a [`models::Dataset`] once; every other module is a
//! read-only view over it.

pub mod analytics;
pub mod error;
pub mod export;
pub mod generator;
pub mod ml;
pub mod models;
pub mod report;
pub mod risk;

pub use error::{DashboardError, DashboardResult};
pub use generator::{generate_dataset, DatasetGenerator, GeneratorConfig};
pub use models::{Category, Contract, Dataset, RenewalType, RiskLevel, SpendHistoryEntry, Status, Vendor};
