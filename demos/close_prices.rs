//! Reads the `Close` column of a price file and prints how many values it holds.
//!
//! ```text
//! cargo run --example close_prices -- demos/data/example.csv
//! ```
use std::{env, path::PathBuf};

use anyhow::Context;
use csvdoc::{get_column, open_csv};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/data/example.csv")
        });

    let doc = open_csv(&path).with_context(|| format!("loading {}", path.display()))?;

    let close: Vec<f32> = get_column(&doc, "Close")?;
    println!("Read {} values.", close.len());

    Ok(())
}
