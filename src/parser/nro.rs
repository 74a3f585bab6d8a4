//! NRO extended delegation statistics.
//!
//! The file opens with a version line and one summary line per resource type, followed by one
//! record per delegated block:
//!
//! ```text
//! 2|nro|20200214|574416|19821213|20200214|+0000
//! nro|*|asn|*|91534|summary
//! nro|*|ipv4|*|214428|summary
//! nro|*|ipv6|*|268454|summary
//! nro|ZZ|ipv4|192.0.2.0|256|20200101|available|ietf
//! nro|ZZ|ipv6|2001:db8::|32|20200101|reserved|ietf
//! ```
//!
//! Header and summary lines are recognized by shape rather than by position, since the number of
//! summary lines changes with the resource types present.
use crate::error::{BogonsError, FeedKind};
use crate::models::*;
use crate::parser::utils::split_body_lines;
use ipnet::{IpNet, Ipv6Net};
use itertools::Itertools;
use log::{debug, info, warn};
use std::net::IpAddr;
use std::str::FromStr;

/// Minimum number of `|`-separated fields in a record line.
const MIN_RECORD_FIELDS: usize = 7;

/// Unassigned IP delegations read from one delegation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationFeed {
    pub header: Option<DelegationHeader>,
    /// Number of record lines seen, of any type and status.
    pub record_count: u64,
    /// Only `ipv4`/`ipv6` records whose status marks them as unassigned.
    pub records: Vec<DelegationRecord>,
}

impl DelegationFeed {
    /// All networks covered by the retained records, in file order.
    pub fn networks(&self) -> impl Iterator<Item = IpNet> + '_ {
        self.records.iter().flat_map(|record| record.networks())
    }
}

/// Parse a delegation file body, keeping unassigned IP records.
pub fn parse_delegations(body: &str) -> Result<DelegationFeed, BogonsError> {
    let mut header: Option<DelegationHeader> = None;
    let mut record_count = 0u64;
    let mut records = vec![];

    for (line_no, line) in split_body_lines(body) {
        if line.starts_with('#') {
            continue;
        }
        let fields = line.split('|').collect_vec();

        if header.is_none() && record_count == 0 {
            if let Some(h) = DelegationHeader::from_fields(&fields) {
                match h.records {
                    Some(n) => debug!(
                        "delegation file version {} from {}, serial {}, {} records",
                        h.version, h.registry, h.serial, n
                    ),
                    None => warn!(
                        "delegation header from {} has unreadable record count '{}'",
                        h.registry, fields[3]
                    ),
                }
                header = Some(h);
                continue;
            }
        }
        if is_summary(&fields) {
            debug!("skipping summary line {}: {}", line_no, line);
            continue;
        }
        if fields.len() < MIN_RECORD_FIELDS {
            return Err(BogonsError::feed_format(
                FeedKind::Nro,
                line_no,
                format!(
                    "expected at least {} fields, found {}",
                    MIN_RECORD_FIELDS,
                    fields.len()
                ),
            ));
        }

        record_count += 1;
        if let Some(record) = parse_record(&fields, line_no)? {
            records.push(record);
        }
    }

    if header.is_none() && record_count == 0 {
        return Err(BogonsError::feed_format(
            FeedKind::Nro,
            0,
            "no header or delegation records found",
        ));
    }
    if let Some(announced) = header.as_ref().and_then(|h| h.records) {
        if announced != record_count {
            warn!(
                "delegation header announces {} records but {} were found",
                announced, record_count
            );
        }
    }

    Ok(DelegationFeed {
        header,
        record_count,
        records,
    })
}

/// Parse a delegation file body straight into AS0 assertions with full-width max lengths.
pub fn parse_nro_assertions(body: &str) -> Result<Vec<PrefixAssertion>, BogonsError> {
    let feed = parse_delegations(body)?;
    let assertions = build_assertions(feed.networks(), MaxPrefixLengths::default());
    info!(
        "{} unassigned delegations out of {} records yield {} prefixes",
        feed.records.len(),
        feed.record_count,
        assertions.len()
    );
    Ok(assertions)
}

/// Summary lines look like `registry|*|type|*|count|summary`.
fn is_summary(fields: &[&str]) -> bool {
    fields.last() == Some(&"summary")
        || (fields.len() >= 4 && fields[1] == "*" && fields[3] == "*")
}

/// Convert one record line into a [DelegationRecord], or `None` if it is not unassigned IP space.
fn parse_record(fields: &[&str], line_no: usize) -> Result<Option<DelegationRecord>, BogonsError> {
    let afi = match ResourceType::from(fields[2]).afi() {
        Some(afi) => afi,
        None => return Ok(None),
    };
    let status = DelegationStatus::from(fields[6]);
    if !status.is_unassigned() {
        return Ok(None);
    }

    let start = IpAddr::from_str(fields[3]).map_err(|_| {
        BogonsError::feed_format(
            FeedKind::Nro,
            line_no,
            format!("invalid start address '{}'", fields[3]),
        )
    })?;
    let value = u128::from_str(fields[4]).map_err(|_| {
        BogonsError::feed_format(
            FeedKind::Nro,
            line_no,
            format!("length/count '{}' is not an integer", fields[4]),
        )
    })?;

    let block = match start {
        IpAddr::V4(_) if afi == Afi::Ipv4 => {
            let range = AddressRange::from_start_count(start, value)
                .map_err(|source| BogonsError::InvalidRange { line: line_no, source })?;
            DelegatedBlock::Ipv4Range(range)
        }
        IpAddr::V6(addr) if afi == Afi::Ipv6 => {
            let network = u8::try_from(value)
                .ok()
                .and_then(|len| Ipv6Net::new(addr, len).ok())
                .ok_or_else(|| {
                    BogonsError::feed_format(
                        FeedKind::Nro,
                        line_no,
                        format!("invalid ipv6 prefix length {}", value),
                    )
                })?;
            if network.trunc() != network {
                return Err(BogonsError::feed_format(
                    FeedKind::Nro,
                    line_no,
                    format!("{} is not a network address", network),
                ));
            }
            DelegatedBlock::Ipv6Network(network)
        }
        _ => {
            return Err(BogonsError::feed_format(
                FeedKind::Nro,
                line_no,
                format!("start address {} is not {}", start, afi),
            ))
        }
    };

    Ok(Some(DelegationRecord {
        registry: fields[0].to_string(),
        country_code: fields[1].to_string(),
        start,
        block,
        date: parse_delegation_date(fields[5]),
        status,
        opaque_id: fields
            .get(7)
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string()),
    }))
}
