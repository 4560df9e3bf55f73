//! Reading prefix lists from files or stdin

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Read prefixes from `path`, or stdin when `path` is `-`
pub fn read_prefix_file(path: &str) -> Result<Vec<String>> {
    if path == "-" {
        read_prefixes(io::stdin().lock()).context("failed to read prefixes from stdin")
    } else {
        let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
        read_prefixes(BufReader::new(file)).with_context(|| format!("failed to read {}", path))
    }
}

/// One prefix per line; blank lines and `#` comments are skipped
pub fn read_prefixes<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut prefixes = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let entry = line.split('#').next().unwrap_or("").trim();
        if !entry.is_empty() {
            prefixes.push(entry.to_string());
        }
    }
    Ok(prefixes)
}
