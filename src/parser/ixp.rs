//! PeeringDB IXP LAN data (`/api/ixlan?depth=2`).
//!
//! Each exchange LAN object carries an `ixpfx_set` with the peering LAN prefixes:
//!
//! ```json
//! {"data": [{"id": 1, "ixpfx_set": [{"protocol": "IPv4", "prefix": "206.223.115.0/24"}]}]}
//! ```
//!
//! Entries that cannot be classified are skipped with a [ParseWarning] instead of failing the feed.
use crate::error::{BogonsError, FeedKind};
use crate::models::{Afi, MaxPrefixLengths, PrefixAssertion};
use ipnet::IpNet;
use log::{info, warn};
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
struct IxLanResponse {
    data: Vec<IxLan>,
}

/// One exchange LAN. Only the fields needed here are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct IxLan {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub ix_id: Option<u64>,
    pub ixpfx_set: Vec<IxPrefix>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IxPrefix {
    pub prefix: String,
    pub protocol: String,
}

/// A non-fatal problem with one IXP LAN prefix entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// `protocol` is neither `IPv4` nor `IPv6`; the entry was skipped.
    UnknownProtocol {
        ixlan_id: Option<u64>,
        prefix: String,
        protocol: String,
    },
    /// The prefix family disagrees with `protocol`; the entry was skipped.
    ProtocolMismatch {
        ixlan_id: Option<u64>,
        prefix: String,
        protocol: String,
    },
    /// The prefix had host bits set and was truncated to its network.
    HostBitsSet {
        ixlan_id: Option<u64>,
        prefix: String,
    },
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lan = |id: &Option<u64>| match id {
            Some(id) => format!("ixlan {}", id),
            None => "ixlan ?".to_string(),
        };
        match self {
            ParseWarning::UnknownProtocol {
                ixlan_id,
                prefix,
                protocol,
            } => write!(
                f,
                "{}: skipping {} with unknown protocol '{}'",
                lan(ixlan_id),
                prefix,
                protocol
            ),
            ParseWarning::ProtocolMismatch {
                ixlan_id,
                prefix,
                protocol,
            } => write!(
                f,
                "{}: skipping {} labelled as {}",
                lan(ixlan_id),
                prefix,
                protocol
            ),
            ParseWarning::HostBitsSet { ixlan_id, prefix } => write!(
                f,
                "{}: {} has host bits set, using its network",
                lan(ixlan_id),
                prefix
            ),
        }
    }
}

/// Assertions produced from the IXP LAN feed, together with the entries that were passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IxpLanReport {
    pub assertions: Vec<PrefixAssertion>,
    pub warnings: Vec<ParseWarning>,
}

fn protocol_afi(protocol: &str) -> Option<Afi> {
    if protocol.eq_ignore_ascii_case("IPv4") {
        Some(Afi::Ipv4)
    } else if protocol.eq_ignore_ascii_case("IPv6") {
        Some(Afi::Ipv6)
    } else {
        None
    }
}

/// Build assertions from already-parsed IXP LAN JSON.
///
/// The max length of each assertion comes from `max_lengths` by protocol, regardless of the
/// prefix's own length.
pub fn parse_ixp_lans(
    value: &serde_json::Value,
    max_lengths: MaxPrefixLengths,
) -> Result<IxpLanReport, BogonsError> {
    let response = IxLanResponse::deserialize(value)
        .map_err(|e| BogonsError::feed_format(FeedKind::IxpLan, 0, e.to_string()))?;
    build_report(&response.data, max_lengths)
}

/// Build assertions from the raw IXP LAN JSON body.
pub fn parse_ixp_lans_str(
    body: &str,
    max_lengths: MaxPrefixLengths,
) -> Result<IxpLanReport, BogonsError> {
    let response: IxLanResponse = serde_json::from_str(body).map_err(|e| {
        BogonsError::feed_format(FeedKind::IxpLan, e.line(), e.to_string())
    })?;
    build_report(&response.data, max_lengths)
}

fn build_report(
    lans: &[IxLan],
    max_lengths: MaxPrefixLengths,
) -> Result<IxpLanReport, BogonsError> {
    let mut report = IxpLanReport::default();

    for (lan_idx, lan) in lans.iter().enumerate() {
        for (pfx_idx, entry) in lan.ixpfx_set.iter().enumerate() {
            let afi = match protocol_afi(&entry.protocol) {
                Some(afi) => afi,
                None => {
                    report.warn(ParseWarning::UnknownProtocol {
                        ixlan_id: lan.id,
                        prefix: entry.prefix.clone(),
                        protocol: entry.protocol.clone(),
                    });
                    continue;
                }
            };

            let prefix = IpNet::from_str(entry.prefix.trim()).map_err(|_| {
                BogonsError::feed_format(
                    FeedKind::IxpLan,
                    0,
                    format!(
                        "data[{}].ixpfx_set[{}]: invalid prefix '{}'",
                        lan_idx, pfx_idx, entry.prefix
                    ),
                )
            })?;
            if Afi::from(&prefix) != afi {
                report.warn(ParseWarning::ProtocolMismatch {
                    ixlan_id: lan.id,
                    prefix: entry.prefix.clone(),
                    protocol: entry.protocol.clone(),
                });
                continue;
            }

            let network = prefix.trunc();
            if network != prefix {
                report.warn(ParseWarning::HostBitsSet {
                    ixlan_id: lan.id,
                    prefix: entry.prefix.clone(),
                });
            }
            report
                .assertions
                .push(PrefixAssertion::as0(network, max_lengths.for_afi(afi)));
        }
    }

    info!(
        "{} exchange LANs yield {} prefixes ({} entries skipped or adjusted)",
        lans.len(),
        report.assertions.len(),
        report.warnings.len()
    );
    Ok(report)
}

impl IxpLanReport {
    fn warn(&mut self, warning: ParseWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}
