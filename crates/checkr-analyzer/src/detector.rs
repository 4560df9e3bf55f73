//! Pairwise overlap detection
//!
//! Every unordered pair of prefixes whose address intervals intersect is
//! reported exactly once. Pairs are oriented and ordered by a stable sort
//! on first address, so input position only decides ties.

use checkr_cidr::AddressRange;
use checkr_core::OverlapReport;
use std::net::Ipv4Addr;

/// A prefix text together with its parsed range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrefix {
    pub cidr: String,
    pub range: AddressRange,
}

impl ParsedPrefix {
    pub fn new(cidr: impl Into<String>, range: AddressRange) -> Self {
        Self {
            cidr: cidr.into(),
            range,
        }
    }
}

/// Overlap between two prefixes, if any
///
/// `a` becomes `cidr1` of the report. The intersection bounds do not depend
/// on argument order.
pub fn overlap_between(a: &ParsedPrefix, b: &ParsedPrefix) -> Option<OverlapReport> {
    let (first, last) = a.range.intersection(&b.range)?;

    Some(OverlapReport {
        cidr1: a.cidr.clone(),
        cidr2: b.cidr.clone(),
        first_ip: Ipv4Addr::from(first),
        last_ip: Ipv4Addr::from(last),
        overlap_hosts: u64::from(last - first) + 1,
    })
}

/// Find every overlapping pair among `prefixes`
///
/// Fewer than two prefixes yield no overlaps. Each report's `cidr1` is the
/// member with the lower first address (earlier input on a tie), and
/// reports are grouped by that member in sorted order.
pub fn detect_overlaps(prefixes: &[ParsedPrefix]) -> Vec<OverlapReport> {
    if prefixes.len() < 2 {
        return Vec::new();
    }

    // Stable: equal first addresses keep input order.
    let mut order: Vec<&ParsedPrefix> = prefixes.iter().collect();
    order.sort_by_key(|p| p.range.first_address());

    let mut overlaps = Vec::new();
    for (pos, current) in order.iter().enumerate() {
        let last = current.range.last_address();

        for other in &order[pos + 1..] {
            // Later entries start at or after `other`, so none can reach back
            // into `current` either.
            if other.range.first_address() > last {
                break;
            }
            if let Some(overlap) = overlap_between(current, other) {
                overlaps.push(overlap);
            }
        }
    }

    overlaps
}
