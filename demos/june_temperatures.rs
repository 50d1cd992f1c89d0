//! Averages the June temperatures of a weather file over the 30 days of June.
//!
//! Dates in the first column are formatted `M/DD/YYYY`; rows whose
//! temperature does not parse are left out of the sum.
use std::{env, path::PathBuf};

use anyhow::Context;
use csvdoc::{get_string_cell, loader::DocumentBuilder};
use log::warn;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/data/weather.csv")
        });

    let doc = DocumentBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let mut sum_of_june_temperatures: i64 = 0;
    for row in 0..doc.row_count() {
        let date = get_string_cell(&doc, 0, row)?;
        if !date.starts_with("6/") {
            continue;
        }
        match doc.get_typed_cell::<i64>(1, row) {
            Ok(temperature) => sum_of_june_temperatures += temperature,
            Err(error) => warn!("Skipping {}: {}", date, error),
        }
    }

    // June has 30 days
    println!("{:.3}", sum_of_june_temperatures as f64 / 30.0);

    Ok(())
}
