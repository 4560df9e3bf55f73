//! IPv4 CIDR parsing and range arithmetic
//!
//! Provides the address-range model used by the analyzer:
//! - Parse CIDR notation (e.g., "192.168.0.0/24") into an [`AddressRange`]
//! - First/last address and raw size of a range
//! - Usable host counts (see [`report`])
//! - Interval intersection between two ranges
//!
//! All address arithmetic is done on `u32` in network byte order.
//!
//! # Examples
//!
//! ```
//! use checkr_cidr::AddressRange;
//!
//! let range = AddressRange::parse("192.168.1.0/24").unwrap();
//! assert_eq!(range.prefix_len(), 24);
//! assert_eq!(range.first_address(), 0xC0A80100); // 192.168.1.0
//! assert_eq!(range.last_address(), 0xC0A801FF); // 192.168.1.255
//! assert!(range.contains(0xC0A80101)); // 192.168.1.1
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

pub mod report;

pub use report::{report, usable_hosts};

/// CIDR parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Not of the form `a.b.c.d/len`, or a field is not numeric
    #[error("Malformed CIDR: {0}")]
    Malformed(String),

    /// Octet above 255 or written with leading zeros
    #[error("Invalid octet: {0}")]
    InvalidOctet(String),

    /// Prefix length outside 0-32
    #[error("Prefix length out of range: {0} (must be 0-32)")]
    PrefixOutOfRange(String),
}

impl CidrError {
    /// Stable reason tag for this error
    pub fn reason(&self) -> &'static str {
        match self {
            CidrError::Malformed(_) => "malformed",
            CidrError::InvalidOctet(_) => "invalid-octet",
            CidrError::PrefixOutOfRange(_) => "out-of-range-prefix",
        }
    }
}

pub type Result<T> = std::result::Result<T, CidrError>;

/// Highest valid prefix length
pub const MAX_PREFIX_LEN: u8 = 32;

/// Contiguous IPv4 address range described by a CIDR prefix
///
/// The stored network address is always aligned to the prefix: host bits
/// given in the input are cleared at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeParts", into = "RangeParts")]
pub struct AddressRange {
    /// Network address (base IP with host bits cleared)
    network: u32,
    /// Prefix length (0-32)
    prefix_len: u8,
}

impl AddressRange {
    /// Parse CIDR notation string
    ///
    /// Surrounding whitespace is ignored. A base address with host bits set
    /// (e.g. `10.0.0.5/24`) is accepted and aligned to `10.0.0.0/24`.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkr_cidr::AddressRange;
    ///
    /// let range = AddressRange::parse("10.0.0.5/24").unwrap();
    /// assert_eq!(range.to_string(), "10.0.0.0/24");
    /// assert!(AddressRange::parse("10.0.0.0/33").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (ip_str, prefix_str) = text.split_once('/').ok_or_else(|| {
            CidrError::Malformed(format!("expected a.b.c.d/len, got '{}'", text))
        })?;

        let prefix_len = parse_prefix_len(prefix_str)?;
        let ip = parse_ipv4(ip_str)?;

        Self::new(ip, prefix_len)
    }

    /// Create a range from any address inside it and a prefix length
    pub fn new(ip: u32, prefix_len: u8) -> Result<Self> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(CidrError::PrefixOutOfRange(prefix_len.to_string()));
        }

        Ok(Self {
            network: ip & mask_for(prefix_len),
            prefix_len,
        })
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Get network mask
    pub fn mask(&self) -> u32 {
        mask_for(self.prefix_len)
    }

    /// Get network mask in dotted-decimal form
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask())
    }

    /// First address of the range (network address)
    pub fn first_address(&self) -> u32 {
        self.network
    }

    /// Last address of the range (broadcast address)
    pub fn last_address(&self) -> u32 {
        self.network | !self.mask()
    }

    /// Total number of addresses, including network and broadcast
    pub fn size(&self) -> u64 {
        u64::from(self.last_address() - self.first_address()) + 1
    }

    /// Check if IP address is in this range
    pub fn contains(&self, ip: u32) -> bool {
        (ip & self.mask()) == self.network
    }

    /// Check whether two ranges share at least one address
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.intersection(other).is_some()
    }

    /// Inclusive bounds of the addresses shared with `other`
    ///
    /// Returns `None` when the intervals are disjoint. The result is the
    /// same whichever side it is called on.
    pub fn intersection(&self, other: &AddressRange) -> Option<(u32, u32)> {
        let first = self.first_address().max(other.first_address());
        let last = self.last_address().min(other.last_address());

        (first <= last).then_some((first, last))
    }
}

/// Serialized form of an [`AddressRange`]
///
/// Converting back into a range rejects prefix lengths above 32 and network
/// addresses with host bits set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeParts {
    pub network: u32,
    pub prefix_len: u8,
}

impl From<AddressRange> for RangeParts {
    fn from(range: AddressRange) -> Self {
        Self {
            network: range.network,
            prefix_len: range.prefix_len,
        }
    }
}

impl TryFrom<RangeParts> for AddressRange {
    type Error = CidrError;

    fn try_from(parts: RangeParts) -> Result<Self> {
        let range = Self::new(parts.network, parts.prefix_len)?;
        if range.network != parts.network {
            return Err(CidrError::Malformed(format!(
                "network {} has host bits set for /{}",
                format_ipv4(parts.network),
                parts.prefix_len
            )));
        }
        Ok(range)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", format_ipv4(self.network), self.prefix_len)
    }
}

impl FromStr for AddressRange {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Left-aligned mask of `prefix_len` one bits
fn mask_for(prefix_len: u8) -> u32 {
    // A shift by 32 overflows, which is exactly the /0 case.
    u32::MAX
        .checked_shl(u32::from(MAX_PREFIX_LEN - prefix_len))
        .unwrap_or(0)
}

fn parse_prefix_len(text: &str) -> Result<u8> {
    if !is_decimal(text) {
        return Err(CidrError::Malformed(format!(
            "invalid prefix length '{}'",
            text
        )));
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(CidrError::Malformed(format!(
            "prefix length '{}' has leading zeros",
            text
        )));
    }

    match text.parse::<u32>() {
        Ok(len) if len <= u32::from(MAX_PREFIX_LEN) => Ok(len as u8),
        _ => Err(CidrError::PrefixOutOfRange(text.to_string())),
    }
}

/// Parse dotted-decimal IPv4 address string to u32
///
/// Each octet must be 1-3 decimal digits without leading zeros and at most 255.
///
/// ```
/// use checkr_cidr::parse_ipv4;
///
/// assert_eq!(parse_ipv4("192.168.1.1").unwrap(), 0xC0A80101);
/// assert!(parse_ipv4("192.168.1").is_err());
/// ```
pub fn parse_ipv4(ip: &str) -> Result<u32> {
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(CidrError::Malformed(format!(
            "expected 4 octets in '{}', found {}",
            ip,
            octets.len()
        )));
    }

    let mut bytes = [0u8; 4];
    for (slot, octet_str) in bytes.iter_mut().zip(&octets) {
        *slot = parse_octet(octet_str)?;
    }

    Ok(u32::from_be_bytes(bytes))
}

fn parse_octet(text: &str) -> Result<u8> {
    if !is_decimal(text) {
        return Err(CidrError::Malformed(format!("non-numeric octet '{}'", text)));
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(CidrError::InvalidOctet(format!(
            "'{}' has leading zeros",
            text
        )));
    }

    // Digits only, so the only failure left is overflow past 255.
    text.parse::<u8>()
        .map_err(|_| CidrError::InvalidOctet(format!("'{}' exceeds 255", text)))
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Render a u32 address in standard dotted-decimal form
pub fn format_ipv4(ip: u32) -> String {
    Ipv4Addr::from(ip).to_string()
}
