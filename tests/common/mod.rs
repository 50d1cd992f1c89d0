#![allow(dead_code)]

mod mocks;

pub use mocks::MockFile;

use std::io::Write;

use tempfile::NamedTempFile;

/// Writes `content` to a fresh `.csv` temp file, removed when dropped.
pub fn fixture(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write CSV file");
    file.flush().expect("Failed to flush CSV file");
    file
}

pub const PRICES: &str = "Date,Open,High,Low,Close,Volume
2017-02-24,64.529999,64.800003,64.139999,64.620003,21705200
2017-02-27,64.540001,64.540001,64.050003,64.230003,20550200
2017-02-28,64.080002,64.199997,63.759998,63.980000,27690000
2017-03-01,64.129997,64.989998,64.110001,64.940002,29260400
";

pub const WEATHER: &str = "date,temperature
5/31/2023,18
6/01/2023,21
6/02/2023,23
6/03/2023,not recorded
7/01/2023,27
";
