//! Per-prefix range reporting

use crate::AddressRange;
use checkr_core::PrefixReport;
use std::net::Ipv4Addr;

/// Usable host count of a range
///
/// Network and broadcast addresses are reserved whenever the range holds
/// more than two addresses. /31 (point-to-point) and /32 (host route)
/// reserve nothing.
pub fn usable_hosts(range: &AddressRange) -> u64 {
    let size = range.size();
    if range.prefix_len() < 31 {
        size - 2
    } else {
        size
    }
}

/// Build the report for one parsed prefix
///
/// `cidr` is carried through unchanged so callers can match reports to
/// their input.
pub fn report(cidr: &str, range: &AddressRange) -> PrefixReport {
    PrefixReport {
        cidr: cidr.to_string(),
        prefix_len: range.prefix_len(),
        first_ip: Ipv4Addr::from(range.first_address()),
        last_ip: Ipv4Addr::from(range.last_address()),
        total_hosts: usable_hosts(range),
    }
}
