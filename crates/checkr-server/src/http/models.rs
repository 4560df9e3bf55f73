//! JSON wire format of the analysis endpoint

use checkr_core::{AnalysisResult, OverlapReport, PrefixReport};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Request body: `{"cidrs": ["10.0.0.0/8", ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub cidrs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidrDetail {
    pub cidr: String,
    pub first_ip: Ipv4Addr,
    pub last_ip: Ipv4Addr,
    pub total_hosts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidrOverlap {
    pub cidr1: String,
    pub cidr2: String,
    /// `first - last`
    pub overlap_range: String,
    pub overlap_hosts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub cidr_details: Vec<CidrDetail>,
    pub overlaps: Vec<CidrOverlap>,
    pub has_collision: bool,
}

impl From<PrefixReport> for CidrDetail {
    fn from(report: PrefixReport) -> Self {
        Self {
            cidr: report.cidr,
            first_ip: report.first_ip,
            last_ip: report.last_ip,
            total_hosts: report.total_hosts,
        }
    }
}

impl From<OverlapReport> for CidrOverlap {
    fn from(report: OverlapReport) -> Self {
        let overlap_range = report.range();
        Self {
            cidr1: report.cidr1,
            cidr2: report.cidr2,
            overlap_range,
            overlap_hosts: report.overlap_hosts,
        }
    }
}

impl From<AnalysisResult> for AnalysisResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            cidr_details: result.cidr_details.into_iter().map(Into::into).collect(),
            overlaps: result.overlaps.into_iter().map(Into::into).collect(),
            has_collision: result.has_collision,
        }
    }
}
