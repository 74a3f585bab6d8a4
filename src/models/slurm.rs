//! SLURM (Simplified Local Internet Number Resource Management with the RPKI) documents.
//!
//! <https://datatracker.ietf.org/doc/rfc8416/>
//!
//! Only `locallyAddedAssertions.prefixAssertions` is ever populated by this crate. The other
//! members are modelled so that existing documents can be read back.
use crate::models::{Afi, Asn};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// Per-family maximum prefix lengths applied to generated assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPrefixLengths {
    pub v4: u8,
    pub v6: u8,
}

impl MaxPrefixLengths {
    pub const fn new(v4: u8, v6: u8) -> Self {
        MaxPrefixLengths { v4, v6 }
    }

    pub const fn for_afi(&self, afi: Afi) -> u8 {
        match afi {
            Afi::Ipv4 => self.v4,
            Afi::Ipv6 => self.v6,
        }
    }
}

impl Default for MaxPrefixLengths {
    /// Full address width, so the assertion covers every more-specific announcement.
    fn default() -> Self {
        MaxPrefixLengths {
            v4: Afi::Ipv4.bits(),
            v6: Afi::Ipv6.bits(),
        }
    }
}

/// A locally added route origin assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixAssertion {
    pub asn: Asn,
    pub prefix: IpNet,
    pub max_prefix_length: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PrefixAssertion {
    /// An assertion that `prefix` has no legitimate origin.
    pub fn as0(prefix: IpNet, max_prefix_length: u8) -> PrefixAssertion {
        PrefixAssertion {
            asn: Asn::RESERVED,
            prefix,
            max_prefix_length,
            comment: None,
        }
    }
}

/// Turn normalized networks into AS0 assertions, choosing the max length by address family.
pub fn build_assertions<I>(networks: I, max_lengths: MaxPrefixLengths) -> Vec<PrefixAssertion>
where
    I: IntoIterator<Item = IpNet>,
{
    networks
        .into_iter()
        .map(|prefix| {
            let max_len = max_lengths.for_afi(Afi::from(&prefix));
            PrefixAssertion::as0(prefix, max_len)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<IpNet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<Asn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpsecFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<Asn>,
    #[serde(rename = "SKI", default, skip_serializing_if = "Option::is_none")]
    pub ski: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpsecAssertion {
    pub asn: Asn,
    #[serde(rename = "SKI")]
    pub ski: String,
    pub router_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutputFilters {
    pub prefix_filters: Vec<PrefixFilter>,
    /// Some older generators wrote the singular `bgpsecFilter`.
    #[serde(alias = "bgpsecFilter")]
    pub bgpsec_filters: Vec<BgpsecFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocallyAddedAssertions {
    pub prefix_assertions: Vec<PrefixAssertion>,
    pub bgpsec_assertions: Vec<BgpsecAssertion>,
}

/// A version 1 SLURM file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlurmDocument {
    pub slurm_version: u32,
    pub validation_output_filters: ValidationOutputFilters,
    pub locally_added_assertions: LocallyAddedAssertions,
}

impl SlurmDocument {
    pub const VERSION: u32 = 1;

    /// Assemble a document whose prefix assertions are the given lists concatenated in order.
    ///
    /// Duplicates across lists are kept.
    pub fn assemble<I>(assertion_lists: I) -> SlurmDocument
    where
        I: IntoIterator<Item = Vec<PrefixAssertion>>,
    {
        let prefix_assertions = assertion_lists.into_iter().flatten().collect();
        SlurmDocument {
            slurm_version: Self::VERSION,
            validation_output_filters: ValidationOutputFilters::default(),
            locally_added_assertions: LocallyAddedAssertions {
                prefix_assertions,
                bgpsec_assertions: vec![],
            },
        }
    }

    pub fn prefix_assertions(&self) -> &[PrefixAssertion] {
        &self.locally_added_assertions.prefix_assertions
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for SlurmDocument {
    fn default() -> Self {
        SlurmDocument::assemble(Vec::<Vec<PrefixAssertion>>::new())
    }
}
