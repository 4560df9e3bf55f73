//! Core report types for CIDR Checkr
//!
//! This crate provides the result types shared by the analyzer and its transports:
//! - [`PrefixReport`] - Address range and usable host count of one prefix
//! - [`OverlapReport`] - Intersection of two overlapping prefixes
//! - [`AnalysisResult`] - Aggregate produced for one analysis request
//!
//! ```
//! use checkr_core::{AnalysisResult, PrefixReport};
//! use std::net::Ipv4Addr;
//!
//! let report = PrefixReport {
//!     cidr: "192.168.1.0/24".to_string(),
//!     prefix_len: 24,
//!     first_ip: Ipv4Addr::new(192, 168, 1, 0),
//!     last_ip: Ipv4Addr::new(192, 168, 1, 255),
//!     total_hosts: 254,
//! };
//! let result = AnalysisResult::new(vec![report], Vec::new());
//! assert!(!result.has_collision);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Range and host statistics for a single input prefix
///
/// `cidr` is the text exactly as the caller supplied it. The addresses are
/// derived from the network-aligned range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixReport {
    /// Original prefix text
    pub cidr: String,
    /// Prefix length (0-32)
    pub prefix_len: u8,
    /// Network address
    pub first_ip: Ipv4Addr,
    /// Broadcast address
    pub last_ip: Ipv4Addr,
    /// Usable hosts (network and broadcast excluded below /31)
    pub total_hosts: u64,
}

/// An overlapping pair of prefixes
///
/// `cidr1` is the range that sorts first by first address (ties broken by
/// input position). `overlap_hosts` is the raw address count of the
/// intersection, with no network/broadcast adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapReport {
    pub cidr1: String,
    pub cidr2: String,
    pub first_ip: Ipv4Addr,
    pub last_ip: Ipv4Addr,
    pub overlap_hosts: u64,
}

impl OverlapReport {
    /// Intersection rendered as `first - last`
    pub fn range(&self) -> String {
        format!("{} - {}", self.first_ip, self.last_ip)
    }
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {}: {} ({} addresses)",
            self.cidr1,
            self.cidr2,
            self.range(),
            self.overlap_hosts
        )
    }
}

/// Outcome of analysing one set of prefixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One report per input, in input order
    pub cidr_details: Vec<PrefixReport>,
    /// Overlaps in detection order
    pub overlaps: Vec<OverlapReport>,
    /// True when at least one overlap was found
    pub has_collision: bool,
}

impl AnalysisResult {
    /// Build a result, deriving `has_collision` from the overlaps
    pub fn new(cidr_details: Vec<PrefixReport>, overlaps: Vec<OverlapReport>) -> Self {
        let has_collision = !overlaps.is_empty();
        Self {
            cidr_details,
            overlaps,
            has_collision,
        }
    }
}
