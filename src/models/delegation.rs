//! Records of the RIR/NRO extended delegation statistics format.
//!
//! <https://www.nro.net/wp-content/uploads/nro-extended-stats-readme5.txt>
use crate::models::{AddressRange, Afi};
use chrono::NaiveDate;
use ipnet::{IpNet, Ipv6Net};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

/// The `type` field of a delegation line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Asn,
    Ipv4,
    Ipv6,
    Other(String),
}

impl ResourceType {
    pub fn afi(&self) -> Option<Afi> {
        match self {
            ResourceType::Ipv4 => Some(Afi::Ipv4),
            ResourceType::Ipv6 => Some(Afi::Ipv6),
            _ => None,
        }
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        match value {
            "asn" => ResourceType::Asn,
            "ipv4" => ResourceType::Ipv4,
            "ipv6" => ResourceType::Ipv6,
            other => ResourceType::Other(other.to_string()),
        }
    }
}

/// The `status` field of a delegation line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DelegationStatus {
    Allocated,
    Assigned,
    Available,
    Reserved,
    IanaPool,
    Ietf,
    Other(String),
}

impl DelegationStatus {
    /// Whether the resource is not currently held by anyone, i.e. should never be routed.
    pub fn is_unassigned(&self) -> bool {
        matches!(
            self,
            DelegationStatus::Available
                | DelegationStatus::Reserved
                | DelegationStatus::IanaPool
                | DelegationStatus::Ietf
        )
    }
}

impl From<&str> for DelegationStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "allocated" => DelegationStatus::Allocated,
            "assigned" => DelegationStatus::Assigned,
            "available" => DelegationStatus::Available,
            "reserved" => DelegationStatus::Reserved,
            "ianapool" => DelegationStatus::IanaPool,
            "ietf" => DelegationStatus::Ietf,
            _ => DelegationStatus::Other(value.to_string()),
        }
    }
}

impl Display for DelegationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DelegationStatus::Allocated => write!(f, "allocated"),
            DelegationStatus::Assigned => write!(f, "assigned"),
            DelegationStatus::Available => write!(f, "available"),
            DelegationStatus::Reserved => write!(f, "reserved"),
            DelegationStatus::IanaPool => write!(f, "ianapool"),
            DelegationStatus::Ietf => write!(f, "ietf"),
            DelegationStatus::Other(v) => write!(f, "{}", v),
        }
    }
}

/// The version line opening a delegation file:
/// `version|registry|serial|records|startdate|enddate|UTCoffset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationHeader {
    pub version: String,
    pub registry: String,
    pub serial: String,
    /// number of records in the file, excluding blank lines, comments, the header and summaries;
    /// `None` when the field is blank or not a number
    pub records: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub utc_offset: String,
}

impl DelegationHeader {
    /// Recognize a version line from its split fields. The version field is numeric, which no
    /// registry name or summary marker ever is.
    pub fn from_fields(fields: &[&str]) -> Option<DelegationHeader> {
        if fields.len() < 7 || !is_version_field(fields[0]) {
            return None;
        }
        Some(DelegationHeader {
            version: fields[0].to_string(),
            registry: fields[1].to_string(),
            serial: fields[2].to_string(),
            records: u64::from_str(fields[3]).ok(),
            start_date: parse_delegation_date(fields[4]),
            end_date: parse_delegation_date(fields[5]),
            utc_offset: fields[6].to_string(),
        })
    }
}

fn is_version_field(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.')
}

/// Parse a `yyyymmdd` date. Unknown dates are written as empty strings or `00000000`.
pub fn parse_delegation_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

/// The start and extent of a delegated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegatedBlock {
    /// IPv4 blocks are counted in addresses and need not be CIDR aligned.
    Ipv4Range(AddressRange),
    /// IPv6 blocks are always a single network.
    Ipv6Network(Ipv6Net),
}

/// One IP delegation line of the extended statistics file.
///
/// `registry|cc|type|start|value|date|status[|opaque-id[|extensions...]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationRecord {
    pub registry: String,
    pub country_code: String,
    pub start: IpAddr,
    pub block: DelegatedBlock,
    pub date: Option<NaiveDate>,
    pub status: DelegationStatus,
    pub opaque_id: Option<String>,
}

impl DelegationRecord {
    pub fn afi(&self) -> Afi {
        Afi::from(self.start)
    }

    /// The CIDR blocks covering this delegation. IPv4 ranges are summarized; IPv6 records are
    /// already a single network.
    pub fn networks(&self) -> Vec<IpNet> {
        match &self.block {
            DelegatedBlock::Ipv4Range(range) => range.to_networks(),
            DelegatedBlock::Ipv6Network(net) => vec![IpNet::V6(*net)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_vocabulary() {
        for s in ["available", "reserved", "ianapool", "ietf", "RESERVED"] {
            assert!(DelegationStatus::from(s).is_unassigned(), "{}", s);
        }
        for s in ["allocated", "assigned", "unknown", ""] {
            assert!(!DelegationStatus::from(s).is_unassigned(), "{}", s);
        }
        assert_eq!(DelegationStatus::from("ianapool").to_string(), "ianapool");
    }

    #[test]
    fn test_resource_type() {
        assert_eq!(ResourceType::from("ipv4").afi(), Some(Afi::Ipv4));
        assert_eq!(ResourceType::from("ipv6").afi(), Some(Afi::Ipv6));
        assert_eq!(ResourceType::from("asn").afi(), None);
        assert_eq!(
            ResourceType::from("*"),
            ResourceType::Other("*".to_string())
        );
    }

    #[test]
    fn test_header() {
        let fields = "2|nro|20200214|574416|19821213|20200214|+0000"
            .split('|')
            .collect::<Vec<_>>();
        let header = DelegationHeader::from_fields(&fields).unwrap();
        assert_eq!(header.version, "2");
        assert_eq!(header.registry, "nro");
        assert_eq!(header.records, Some(574416));
        assert_eq!(header.start_date, NaiveDate::from_ymd_opt(1982, 12, 13));
        assert_eq!(header.end_date, NaiveDate::from_ymd_opt(2020, 2, 14));

        let summary = "nro|*|ipv4|*|214428|summary".split('|').collect::<Vec<_>>();
        assert!(DelegationHeader::from_fields(&summary).is_none());
        let record = "nro|ZZ|ipv4|192.0.2.0|256|20200101|available"
            .split('|')
            .collect::<Vec<_>>();
        assert!(DelegationHeader::from_fields(&record).is_none());

        let blank_count = "2|nro|20200214||19821213|20200214|+0000"
            .split('|')
            .collect::<Vec<_>>();
        let header = DelegationHeader::from_fields(&blank_count).unwrap();
        assert_eq!(header.serial, "20200214");
        assert_eq!(header.records, None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            parse_delegation_date("20200101"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(parse_delegation_date("00000000"), None);
        assert_eq!(parse_delegation_date(""), None);
    }
}
