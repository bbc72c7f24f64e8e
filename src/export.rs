use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::DashboardResult;
use crate::models::Dataset;

pub const VENDORS_CSV: &str = "vendors.csv";
pub const SPEND_HISTORY_CSV: &str = "spend_history.csv";
pub const CONTRACTS_CSV: &str = "contracts.csv";

pub fn write_json<W: Write>(dataset: &Dataset, writer: W) -> DashboardResult<()> {
    serde_json::to_writer_pretty(writer, dataset)?;
    Ok(())
}

pub fn write_json_file(dataset: &Dataset, path: &Path) -> DashboardResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(dataset, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), "wrote dataset JSON");
    Ok(())
}

pub fn write_csv<W: Write, T: Serialize>(records: &[T], writer: W) -> DashboardResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}

/// Writes one CSV per collection into `dir`, creating it if needed.
pub fn write_csv_dir(dataset: &Dataset, dir: &Path) -> DashboardResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let vendors = dir.join(VENDORS_CSV);
    let history = dir.join(SPEND_HISTORY_CSV);
    let contracts = dir.join(CONTRACTS_CSV);

    let rows = write_csv(&dataset.vendors, File::create(&vendors)?)?;
    debug!(path = %vendors.display(), rows, "wrote vendors");
    let rows = write_csv(&dataset.spend_history, File::create(&history)?)?;
    debug!(path = %history.display(), rows, "wrote spend history");
    let rows = write_csv(&dataset.contracts, File::create(&contracts)?)?;
    debug!(path = %contracts.display(), rows, "wrote contracts");

    Ok(vec![vendors, history, contracts])
}
