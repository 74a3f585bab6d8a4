/*!
error module defines the error types used in rpki-as0-bogons.
*/
use crate::models::Afi;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::{error::Error as StdError, fmt, io};
use thiserror::Error;

/// Identifies which upstream feed a format error was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Cymru,
    Nro,
    IxpLan,
}

impl Display for FeedKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Cymru => write!(f, "cymru bogons"),
            FeedKind::Nro => write!(f, "nro delegated-extended"),
            FeedKind::IxpLan => write!(f, "peeringdb ixlan"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BogonsError {
    /// The retrieval collaborator could not produce a feed body.
    ///
    /// ## Occurs during:
    ///  - Fetching any selected source
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    Remote {
        url: String,
        #[source]
        source: oneio::OneIoError,
    },
    /// A feed body does not match the layout expected for that feed. Lines are 1-based; line 0
    /// refers to the body as a whole.
    ///
    /// ## Occurs during:
    ///  - Parsing Cymru bogon lines
    ///  - Splitting NRO delegation records
    ///  - Deserializing PeeringDB IXP LAN data
    #[error("malformed {feed} feed at line {line}: {reason}")]
    FeedFormat {
        feed: FeedKind,
        line: usize,
        reason: String,
    },
    /// A delegation record describes an address range that cannot exist.
    ///
    /// ## Occurs during:
    ///  - Converting NRO IPv4 (start, count) records into networks
    #[error("invalid delegation at line {line}: {source}")]
    InvalidRange {
        line: usize,
        #[source]
        source: InvalidRangeError,
    },
    #[error("failed to write {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BogonsError {
    pub(crate) fn feed_format(feed: FeedKind, line: usize, reason: impl Into<String>) -> Self {
        BogonsError::FeedFormat {
            feed,
            line,
            reason: reason.into(),
        }
    }

    /// Whether the error came from retrieval rather than from the content of a feed.
    pub fn is_fetch_error(&self) -> bool {
        match self {
            BogonsError::Fetch { .. } => true,
            #[cfg(feature = "remote")]
            BogonsError::Remote { .. } => true,
            _ => false,
        }
    }
}

/// An inclusive address range `[first, last]` that is empty or does not fit in its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRangeError {
    pub afi: Afi,
    pub first: u128,
    pub last: u128,
}

impl Display for InvalidRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let fmt_bound = |v: u128| match self.afi.addr_from_bits(v) {
            Some(addr) => addr.to_string(),
            None => format!("{v} (out of {} range)", self.afi),
        };
        write!(
            f,
            "invalid {} range {} - {}",
            self.afi,
            fmt_bound(self.first),
            fmt_bound(self.last)
        )
    }
}

impl StdError for InvalidRangeError {}
