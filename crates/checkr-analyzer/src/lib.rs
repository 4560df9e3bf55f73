//! CIDR overlap analysis
//!
//! Single entry point for transports: [`analyze`] takes the prefix texts of
//! one request and returns per-prefix reports plus every overlapping pair.
//!
//! - Every prefix is parsed before anything is reported; one bad entry
//!   aborts the whole analysis
//! - Reports come back in input order
//! - Overlaps are found over all pairs (see [`detector`])
//!
//! The analysis holds no state between calls and is safe to run
//! concurrently from any number of tasks.
//!
//! # Examples
//!
//! ```
//! use checkr_analyzer::analyze;
//!
//! let result = analyze(&["10.0.0.0/8", "10.0.0.0/9"]).unwrap();
//! assert!(result.has_collision);
//! assert_eq!(result.overlaps[0].overlap_hosts, 8_388_608);
//! ```

use checkr_cidr::{AddressRange, CidrError};
use checkr_core::AnalysisResult;
use thiserror::Error;
use tracing::debug;

pub mod detector;

pub use detector::{detect_overlaps, overlap_between, ParsedPrefix};

/// Smallest number of prefixes an analysis accepts
pub const MIN_PREFIXES: usize = 2;

/// Analysis errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Too few prefixes to compare
    #[error("At least 2 CIDRs are required, got {count}")]
    InsufficientInput { count: usize },

    /// An input could not be parsed
    #[error("Invalid CIDR '{text}' at position {index}: {source}")]
    InvalidPrefix {
        index: usize,
        text: String,
        #[source]
        source: CidrError,
    },
}

impl AnalysisError {
    /// Stable kind tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InsufficientInput { .. } => "insufficient-input",
            AnalysisError::InvalidPrefix { .. } => "invalid-prefix",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Parse every input, in order, stopping at the first failure
pub fn parse_all<S: AsRef<str>>(cidrs: &[S]) -> Result<Vec<ParsedPrefix>> {
    cidrs
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let text: &str = text.as_ref();
            AddressRange::parse(text)
                .map(|range| ParsedPrefix::new(text, range))
                .map_err(|source| AnalysisError::InvalidPrefix {
                    index,
                    text: text.to_string(),
                    source,
                })
        })
        .collect()
}

/// Analyze a set of prefixes
///
/// # Arguments
///
/// * `cidrs` - Prefix texts in CIDR notation; at least [`MIN_PREFIXES`]
///
/// # Errors
///
/// [`AnalysisError::InsufficientInput`] for fewer than two inputs and
/// [`AnalysisError::InvalidPrefix`] naming the first input that fails to parse.
pub fn analyze<S: AsRef<str>>(cidrs: &[S]) -> Result<AnalysisResult> {
    if cidrs.len() < MIN_PREFIXES {
        return Err(AnalysisError::InsufficientInput { count: cidrs.len() });
    }

    let prefixes = parse_all(cidrs)?;

    let details = prefixes
        .iter()
        .map(|p| checkr_cidr::report(&p.cidr, &p.range))
        .collect();
    let overlaps = detect_overlaps(&prefixes);

    debug!(
        prefixes = prefixes.len(),
        overlaps = overlaps.len(),
        "analysis complete"
    );

    Ok(AnalysisResult::new(details, overlaps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_reports_in_input_order() {
        let result = analyze(&["192.168.1.0/24", "10.0.0.0/8"]).unwrap();

        let cidrs: Vec<&str> = result.cidr_details.iter().map(|d| d.cidr.as_str()).collect();
        assert_eq!(cidrs, vec!["192.168.1.0/24", "10.0.0.0/8"]);
    }

    #[test]
    fn test_analyze_accepts_owned_strings() {
        let input = vec!["10.0.0.0/8".to_string(), "10.0.0.0/9".to_string()];
        let result = analyze(&input).unwrap();
        assert_eq!(result.overlaps.len(), 1);
    }

    #[test]
    fn test_insufficient_input() {
        let err = analyze(&["10.0.0.0/8"]).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientInput { count: 1 });
        assert_eq!(err.kind(), "insufficient-input");

        let empty: [&str; 0] = [];
        assert!(matches!(
            analyze(&empty),
            Err(AnalysisError::InsufficientInput { count: 0 })
        ));
    }

    #[test]
    fn test_insufficient_input_checked_before_parsing() {
        let err = analyze(&["invalid-cidr"]).unwrap_err();
        assert_eq!(err.kind(), "insufficient-input");
    }

    #[test]
    fn test_first_invalid_prefix_is_reported() {
        let err = analyze(&["10.0.0.0/8", "bad", "10.0.0.0/33"]).unwrap_err();

        match err {
            AnalysisError::InvalidPrefix { index, text, source } => {
                assert_eq!(index, 1);
                assert_eq!(text, "bad");
                assert_eq!(source.reason(), "malformed");
            }
            other => panic!("expected InvalidPrefix, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let err = analyze(&["10.0.0.0/8", "10.0.0.0/33"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid CIDR '10.0.0.0/33' at position 1: Prefix length out of range: 33 (must be 0-32)"
        );

        let err = analyze(&["10.0.0.0/8"]).unwrap_err();
        assert_eq!(err.to_string(), "At least 2 CIDRs are required, got 1");
    }

    #[test]
    fn test_parse_all() {
        let parsed = parse_all(&["10.0.0.5/24", "8.8.8.8/32"]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].cidr, "10.0.0.5/24");
        assert_eq!(parsed[0].range.to_string(), "10.0.0.0/24");
    }

    #[test]
    fn test_deterministic() {
        let input = ["10.0.0.0/8", "10.1.0.0/16", "10.1.2.0/24", "192.168.0.0/16"];
        assert_eq!(analyze(&input).unwrap(), analyze(&input).unwrap());
    }
}
