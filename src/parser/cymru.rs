//! Team Cymru bogon lists: a few `#` header lines followed by one CIDR network per line.
//!
//! ```text
//! # last updated 1581670201 (Fri Feb 14 08:50:01 2020 GMT)
//! # Know your network!  Please rigorously test all filters!
//! 0.0.0.0/8
//! 10.0.0.0/8
//! ```
use crate::error::{BogonsError, FeedKind};
use crate::models::Afi;
use crate::parser::utils::split_body_lines;
use ipnet::IpNet;
use log::debug;
use std::str::FromStr;

/// Parse the body of a bogon list for one address family.
///
/// Leading lines are skipped until the first valid network of `afi`; from then on every line
/// must be such a network. A body without any network is an error.
pub fn parse_cymru_bogons(body: &str, afi: Afi) -> Result<Vec<IpNet>, BogonsError> {
    let mut networks = vec![];

    for (line_no, line) in split_body_lines(body) {
        let line = line.trim();
        match parse_network(line, afi) {
            Ok(network) => networks.push(network),
            Err(_) if networks.is_empty() => {
                debug!("skipping cymru header line {}: {}", line_no, line);
            }
            Err(reason) => {
                return Err(BogonsError::feed_format(FeedKind::Cymru, line_no, reason));
            }
        }
    }

    if networks.is_empty() {
        return Err(BogonsError::feed_format(
            FeedKind::Cymru,
            0,
            format!("no {} networks found", afi),
        ));
    }
    Ok(networks)
}

fn parse_network(line: &str, afi: Afi) -> Result<IpNet, String> {
    let network =
        IpNet::from_str(line).map_err(|_| format!("'{}' is not a CIDR network", line))?;
    if Afi::from(&network) != afi {
        return Err(format!("'{}' is not an {} network", line, afi));
    }
    if network.trunc() != network {
        return Err(format!("'{}' has host bits set", line));
    }
    Ok(network)
}
