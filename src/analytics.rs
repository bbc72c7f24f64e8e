use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{DashboardError, DashboardResult};
use crate::generator::{contract_status, HISTORY_MONTHS, ROSTER_SIZE};
use crate::models::{Category, CategoryTotal, Contract, Dataset, SpendHistoryEntry, Vendor};

pub fn total_spend(history: &[SpendHistoryEntry]) -> u64 {
    history.iter().map(|entry| entry.total).sum()
}

/// Per-category spend summed over the whole history, in category order.
pub fn category_totals(history: &[SpendHistoryEntry]) -> Vec<CategoryTotal> {
    Category::ALL
        .iter()
        .map(|category| CategoryTotal {
            category: *category,
            value: history.iter().map(|entry| entry.value(*category)).sum(),
        })
        .collect()
}

/// Vendor spend grouped by category, largest first.
pub fn spend_by_category(vendors: &[Vendor]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Category::ALL
        .iter()
        .map(|category| CategoryTotal {
            category: *category,
            value: vendors
                .iter()
                .filter(|vendor| vendor.category == *category)
                .map(|vendor| vendor.spend)
                .sum(),
        })
        .collect();

    totals.sort_by_key(|total| Reverse(total.value));
    totals
}

/// Case-insensitive match on vendor name or category label.
pub fn filter_vendors<'a>(vendors: &'a [Vendor], query: &str) -> Vec<&'a Vendor> {
    let needle = query.to_lowercase();
    vendors
        .iter()
        .filter(|vendor| {
            vendor.name.to_lowercase().contains(&needle)
                || vendor.category.label().to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn vendor_by_id<'a>(vendors: &'a [Vendor], id: &str) -> Option<&'a Vendor> {
    vendors.iter().find(|vendor| vendor.id == id)
}

pub fn expiring_contracts(contracts: &[Contract], before: NaiveDate) -> Vec<&Contract> {
    contracts
        .iter()
        .filter(|contract| contract.end_date < before)
        .collect()
}

pub fn exposure<'a>(contracts: impl IntoIterator<Item = &'a Contract>) -> u64 {
    contracts.into_iter().map(|contract| contract.value).sum()
}

/// Checks the cross-record guarantees the display layer relies on.
pub fn validate(dataset: &Dataset) -> DashboardResult<()> {
    let violation = |message: String| Err(DashboardError::InvariantViolation(message));

    if dataset.vendors.len() != ROSTER_SIZE {
        return violation(format!(
            "expected {ROSTER_SIZE} vendors, found {}",
            dataset.vendors.len()
        ));
    }

    let mut seen = HashSet::new();
    for vendor in &dataset.vendors {
        let well_formed = vendor.id.len() == 5
            && vendor.id.starts_with("V-")
            && vendor.id_suffix().chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return violation(format!("malformed vendor id {}", vendor.id));
        }
        if !seen.insert(vendor.id.as_str()) {
            return violation(format!("duplicate vendor id {}", vendor.id));
        }
    }

    if dataset.spend_history.len() != HISTORY_MONTHS as usize {
        return violation(format!(
            "expected {HISTORY_MONTHS} spend entries, found {}",
            dataset.spend_history.len()
        ));
    }

    for entry in &dataset.spend_history {
        if entry.total != entry.category_sum() {
            return violation(format!(
                "spend total {} for {} does not match category sum {}",
                entry.total,
                entry.date,
                entry.category_sum()
            ));
        }
    }

    if let Some(pair) = dataset
        .spend_history
        .windows(2)
        .find(|pair| pair[0].date >= pair[1].date)
    {
        return violation(format!(
            "spend history out of order at {} -> {}",
            pair[0].date, pair[1].date
        ));
    }

    if dataset.contracts.len() != dataset.vendors.len() {
        return violation(format!(
            "{} contracts for {} vendors",
            dataset.contracts.len(),
            dataset.vendors.len()
        ));
    }

    for (contract, vendor) in dataset.contracts.iter().zip(&dataset.vendors) {
        if contract.vendor_id != vendor.id {
            return violation(format!(
                "contract {} points at {} instead of {}",
                contract.id, contract.vendor_id, vendor.id
            ));
        }
        if contract.status != contract_status(vendor) {
            return violation(format!(
                "contract {} has status {} but vendor {} is {}",
                contract.id, contract.status, vendor.id, vendor.status
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_dataset, GeneratorConfig};
    use crate::models::Status;

    fn dataset(seed: u64) -> Dataset {
        generate_dataset(GeneratorConfig {
            seed: Some(seed),
            as_of: NaiveDate::from_ymd_opt(2026, 3, 1),
        })
        .unwrap()
    }

    #[test]
    fn generated_datasets_validate() {
        for seed in 0..25 {
            validate(&dataset(seed)).unwrap();
        }
    }

    #[test]
    fn validate_flags_unreconciled_totals() {
        let mut data = dataset(3);
        data.spend_history[4].total += 1;
        let err = validate(&data).unwrap_err();
        assert!(matches!(err, DashboardError::InvariantViolation(_)));
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn validate_flags_dangling_contract() {
        let mut data = dataset(3);
        data.contracts[7].vendor_id = "V-999".to_string();
        assert!(validate(&data).is_err());

        let mut data = dataset(3);
        data.vendors[2].id = "V-001".to_string();
        data.contracts[2].vendor_id = "V-001".to_string();
        assert!(validate(&data).unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn validate_flags_contract_status_drift() {
        let mut data = dataset(3);
        data.contracts[0].status = Status::Expired;
        let err = validate(&data).unwrap_err();
        assert!(err.to_string().contains("CTR-001 has status Expired"));
    }

    #[test]
    fn filter_matches_name_or_category_ignoring_case() {
        let data = dataset(1);
        let by_name = filter_vendors(&data.vendors, "aDyEn");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "V-002");

        let by_category = filter_vendors(&data.vendors, "insurance");
        assert!(by_category.iter().all(|v| v.category == Category::Insurance));
        assert!(by_category.iter().any(|v| v.name == "Allianz"));

        assert_eq!(filter_vendors(&data.vendors, "").len(), data.vendors.len());
        assert!(filter_vendors(&data.vendors, "no such vendor").is_empty());
    }

    #[test]
    fn category_totals_add_up_to_history_total() {
        let data = dataset(8);
        let totals = category_totals(&data.spend_history);
        assert_eq!(totals.len(), 7);
        let summed: u64 = totals.iter().map(|t| t.value).sum();
        assert_eq!(summed, total_spend(&data.spend_history));
    }

    #[test]
    fn spend_by_category_is_sorted_descending() {
        let data = dataset(8);
        let totals = spend_by_category(&data.vendors);
        assert!(totals.windows(2).all(|pair| pair[0].value >= pair[1].value));
        let vendor_total: u64 = data.vendors.iter().map(|v| v.spend).sum();
        assert_eq!(totals.iter().map(|t| t.value).sum::<u64>(), vendor_total);
    }

    #[test]
    fn expiring_contracts_and_exposure() {
        let data = dataset(2);
        let cutoff = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let expiring = expiring_contracts(&data.contracts, cutoff);
        assert!(expiring.iter().all(|c| c.end_date < cutoff));
        let expected: u64 = data
            .contracts
            .iter()
            .filter(|c| c.end_date < cutoff)
            .map(|c| c.value)
            .sum();
        assert_eq!(exposure(expiring), expected);
    }

    #[test]
    fn lookup_by_id() {
        let data = dataset(2);
        assert_eq!(vendor_by_id(&data.vendors, "V-013").unwrap().name, "HSBC");
        assert!(vendor_by_id(&data.vendors, "V-041").is_none());
    }
}
