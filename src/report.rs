use std::cmp::Reverse;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::analytics;
use crate::models::Dataset;
use crate::risk;

pub fn build_report(dataset: &Dataset, as_of: NaiveDate, expiring_before: NaiveDate) -> String {
    let history_total = analytics::total_spend(&dataset.spend_history);
    let category_totals = analytics::category_totals(&dataset.spend_history);
    let vendor_spend = analytics::spend_by_category(&dataset.vendors);
    let distribution = risk::risk_distribution(&dataset.vendors);
    let expiring = analytics::expiring_contracts(&dataset.contracts, expiring_before);

    let mut output = String::new();

    let _ = writeln!(output, "# Procurement Analytics Report");
    let _ = writeln!(
        output,
        "Generated as of {} ({} vendors, {} months of spend)",
        as_of,
        dataset.vendors.len(),
        dataset.spend_history.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Spend Overview");

    match (dataset.spend_history.first(), dataset.spend_history.last()) {
        (Some(first), Some(last)) => {
            let _ = writeln!(
                output,
                "Total spend {} to {}: {}",
                first.display_date,
                last.display_date,
                format_eur(history_total)
            );
            let _ = writeln!(
                output,
                "Latest month ({}): {}",
                last.display_date,
                format_eur(last.total)
            );
            for total in category_totals.iter() {
                let _ = writeln!(output, "- {}: {}", total.category, format_eur(total.value));
            }
        }
        _ => {
            let _ = writeln!(output, "No spend history recorded.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Vendor Spend by Category");

    if dataset.vendors.is_empty() {
        let _ = writeln!(output, "No vendors on the roster.");
    } else {
        for total in vendor_spend.iter() {
            let _ = writeln!(output, "- {}: {}", total.category, format_eur(total.value));
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Mix");
    let _ = writeln!(
        output,
        "- High: {}\n- Medium: {}\n- Low: {}",
        distribution.high, distribution.medium, distribution.low
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Contracts Expiring Before {}", expiring_before);

    if expiring.is_empty() {
        let _ = writeln!(output, "No contracts expire in this window.");
    } else {
        let _ = writeln!(
            output,
            "{} contracts expiring. Total value exposure: {}.",
            expiring.len(),
            format_eur(analytics::exposure(expiring.iter().copied()))
        );
        for contract in expiring.iter() {
            let _ = writeln!(
                output,
                "- {} {} ({}) ends {}, {}, {}",
                contract.id,
                contract.vendor_name,
                contract.category,
                contract.end_date,
                contract.renewal_type,
                format_eur(contract.value)
            );
        }
    }

    let mut top_vendors: Vec<_> = dataset.vendors.iter().collect();
    top_vendors.sort_by_key(|vendor| Reverse(vendor.spend));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Spend Vendors");

    if top_vendors.is_empty() {
        let _ = writeln!(output, "No vendors on the roster.");
    } else {
        for vendor in top_vendors.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} {} ({}, {} risk, {}) {} SLA {:.1}% trend {:+.1}%",
                vendor.id,
                vendor.name,
                vendor.category,
                vendor.risk,
                vendor.status,
                format_eur(vendor.spend),
                vendor.sla,
                vendor.trend
            );
        }
    }

    output
}

/// Whole euros with thousands separators, e.g. `€14,200,000`.
pub fn format_eur(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("€{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_dataset, GeneratorConfig};

    fn dataset() -> Dataset {
        generate_dataset(GeneratorConfig {
            seed: Some(21),
            as_of: NaiveDate::from_ymd_opt(2026, 2, 1),
        })
        .unwrap()
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_eur(0), "€0");
        assert_eq!(format_eur(999), "€999");
        assert_eq!(format_eur(1_000), "€1,000");
        assert_eq!(format_eur(14_200_000), "€14,200,000");
    }

    #[test]
    fn report_has_every_section() {
        let data = dataset();
        let as_of = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let cutoff = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let report = build_report(&data, as_of, cutoff);

        assert!(report.starts_with("# Procurement Analytics Report"));
        for heading in [
            "## Spend Overview",
            "## Vendor Spend by Category",
            "## Risk Mix",
            "## Contracts Expiring Before 2026-05-01",
            "## Highest Spend Vendors",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
        assert!(report.contains("Latest month (Feb 26)"));
        assert!(report.contains("V-001 Worldline"));
    }

    #[test]
    fn empty_window_prints_placeholder() {
        let data = dataset();
        let as_of = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let cutoff = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let report = build_report(&data, as_of, cutoff);
        assert!(report.contains("No contracts expire in this window."));
    }
}
