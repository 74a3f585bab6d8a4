/*!
Feed sources and the pipeline that turns a selection of them into one SLURM document.

Sources are processed one after another, in the order they were added. A failing source aborts
the run unless [SlurmGenerator::allow_partial] is set.
*/
use crate::error::BogonsError;
use crate::io::FeedFetcher;
use crate::models::{build_assertions, Afi, MaxPrefixLengths, PrefixAssertion, SlurmDocument};
use crate::parser::{parse_cymru_bogons, parse_ixp_lans, parse_nro_assertions, ParseWarning};
use itertools::Itertools;
use log::{error, info};

pub const NRO_DELEGATED_EXTENDED_URL: &str =
    "https://www.nro.net/wp-content/uploads/apnic-uploads/delegated-extended";
pub const CYMRU_FULLBOGONS_V4_URL: &str =
    "https://www.team-cymru.org/Services/Bogons/fullbogons-ipv4.txt";
pub const CYMRU_FULLBOGONS_V6_URL: &str =
    "https://www.team-cymru.org/Services/Bogons/fullbogons-ipv6.txt";
pub const PEERINGDB_IXLAN_URL: &str = "https://peeringdb.com/api/ixlan?depth=2";

/// A feed contributing prefix assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Team Cymru full bogon lists, one per address family.
    Cymru { v4_url: String, v6_url: String },
    /// NRO extended delegation statistics; unassigned space becomes bogons.
    Nro { url: String },
    /// PeeringDB exchange LAN prefixes, which should never be routed either.
    IxpLan {
        url: String,
        max_lengths: MaxPrefixLengths,
    },
}

impl Source {
    pub fn cymru() -> Source {
        Source::Cymru {
            v4_url: CYMRU_FULLBOGONS_V4_URL.to_string(),
            v6_url: CYMRU_FULLBOGONS_V6_URL.to_string(),
        }
    }

    pub fn nro() -> Source {
        Source::Nro {
            url: NRO_DELEGATED_EXTENDED_URL.to_string(),
        }
    }

    pub fn ixp_lan() -> Source {
        Source::IxpLan {
            url: PEERINGDB_IXLAN_URL.to_string(),
            max_lengths: MaxPrefixLengths::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Source::Cymru { .. } => "cymru",
            Source::Nro { .. } => "nro",
            Source::IxpLan { .. } => "ixp-lan",
        }
    }

    /// Fetch and parse this source.
    pub fn fetch_assertions<F: FeedFetcher + ?Sized>(
        &self,
        fetcher: &F,
    ) -> Result<SourceOutput, BogonsError> {
        let output = match self {
            Source::Cymru { v4_url, v6_url } => {
                let mut assertions = vec![];
                for (url, afi) in [(v4_url, Afi::Ipv4), (v6_url, Afi::Ipv6)] {
                    let body = fetcher.fetch_text(url)?;
                    let networks = parse_cymru_bogons(&body, afi)?;
                    info!("{} {} bogons from {}", networks.len(), afi, url);
                    assertions.extend(build_assertions(networks, MaxPrefixLengths::default()));
                }
                SourceOutput::from(assertions)
            }
            Source::Nro { url } => {
                let body = fetcher.fetch_text(url)?;
                SourceOutput::from(parse_nro_assertions(&body)?)
            }
            Source::IxpLan { url, max_lengths } => {
                let value = fetcher.fetch_json(url)?;
                let report = parse_ixp_lans(&value, *max_lengths)?;
                SourceOutput {
                    assertions: report.assertions,
                    warnings: report.warnings,
                }
            }
        };
        Ok(output)
    }
}

/// What one source contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutput {
    pub assertions: Vec<PrefixAssertion>,
    pub warnings: Vec<ParseWarning>,
}

impl From<Vec<PrefixAssertion>> for SourceOutput {
    fn from(assertions: Vec<PrefixAssertion>) -> Self {
        SourceOutput {
            assertions,
            warnings: vec![],
        }
    }
}

/// Result of a generator run.
#[derive(Debug)]
pub struct Generated {
    pub document: SlurmDocument,
    pub warnings: Vec<ParseWarning>,
    /// Sources that failed and were left out; only ever non-empty with `allow_partial`.
    pub failed: Vec<(Source, BogonsError)>,
}

/// Builds a SLURM document from a selection of sources.
///
/// ```
/// use rpki_as0_bogons::{BogonsError, FeedFetcher, SlurmGenerator, Source};
///
/// struct Canned;
///
/// impl FeedFetcher for Canned {
///     fn fetch_text(&self, _url: &str) -> Result<String, BogonsError> {
///         Ok("nro|ZZ|ipv4|192.0.2.0|256|20200101|available\n".to_string())
///     }
/// }
///
/// let generated = SlurmGenerator::new(Canned)
///     .add_source(Source::nro())
///     .generate()
///     .unwrap();
/// let prefixes = generated.document.prefix_assertions();
/// assert_eq!(prefixes[0].prefix.to_string(), "192.0.2.0/24");
/// ```
pub struct SlurmGenerator<F> {
    fetcher: F,
    sources: Vec<Source>,
    allow_partial: bool,
}

impl<F: FeedFetcher> SlurmGenerator<F> {
    pub fn new(fetcher: F) -> SlurmGenerator<F> {
        SlurmGenerator {
            fetcher,
            sources: vec![],
            allow_partial: false,
        }
    }

    pub fn add_source(mut self, source: Source) -> SlurmGenerator<F> {
        self.sources.push(source);
        self
    }

    /// Keep going when a source fails, leaving its assertions out of the document.
    pub fn allow_partial(mut self, allow: bool) -> SlurmGenerator<F> {
        self.allow_partial = allow;
        self
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn generate(&self) -> Result<Generated, BogonsError> {
        let mut lists = vec![];
        let mut warnings = vec![];
        let mut failed = vec![];

        for source in &self.sources {
            match source.fetch_assertions(&self.fetcher) {
                Ok(output) => {
                    info!(
                        "source {} contributed {} assertions",
                        source.name(),
                        output.assertions.len()
                    );
                    lists.push(output.assertions);
                    warnings.extend(output.warnings);
                }
                Err(e) if self.allow_partial => {
                    error!("leaving out source {}: {}", source.name(), e);
                    failed.push((source.clone(), e));
                }
                Err(e) => return Err(e),
            }
        }

        if !failed.is_empty() {
            error!(
                "document is incomplete, failed sources: {}",
                failed.iter().map(|(s, _)| s.name()).join(", ")
            );
        }

        Ok(Generated {
            document: SlurmDocument::assemble(lists),
            warnings,
            failed,
        })
    }
}

#[cfg(feature = "remote")]
impl SlurmGenerator<crate::io::OneIoFetcher> {
    /// A generator fetching feeds over the network.
    pub fn remote() -> Self {
        SlurmGenerator::new(crate::io::OneIoFetcher)
    }
}
