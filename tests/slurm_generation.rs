//! This integration test drives the whole pipeline (fetch, parse, assemble, write) against canned
//! feed bodies, without touching the network.
use rpki_as0_bogons::source::{
    CYMRU_FULLBOGONS_V4_URL, CYMRU_FULLBOGONS_V6_URL, NRO_DELEGATED_EXTENDED_URL,
    PEERINGDB_IXLAN_URL,
};
use rpki_as0_bogons::{
    write_document, BogonsError, FeedFetcher, SlurmDocument, SlurmGenerator, Source,
};
use serde_json::json;
use std::collections::HashMap;

const CYMRU_V4: &str = "# last updated 1581670201 (Fri Feb 14 08:50:01 2020 GMT)
# Know your network!  Please rigorously test all filters!
0.0.0.0/8
10.0.0.0/8
100.64.0.0/10
";

const CYMRU_V6: &str = "# last updated 1581670201 (Fri Feb 14 08:50:01 2020 GMT)
# Know your network!  Please rigorously test all filters!
2001:db8::/32
";

const NRO: &str = "2|nro|20200214|5|19821213|20200214|+0000
nro|*|asn|*|1|summary
nro|*|ipv4|*|3|summary
nro|*|ipv6|*|1|summary
nro|ZZ|asn|23456|1|20200101|reserved|ietf
nro|ZZ|ipv4|0.0.0.1|3|20200101|reserved|ietf
nro|ZZ|ipv4|192.0.2.0|256|20200101|available|ietf
nro|US|ipv4|8.8.8.0|256|19920101|allocated|A91872ED
nro|ZZ|ipv6|2001:db8::|32|20200101|reserved|ietf
";

const IXLAN: &str = r#"{"meta": {}, "data": [
    {"id": 1, "ix_id": 1, "name": "", "ixpfx_set": [
        {"id": 1, "protocol": "IPv4", "prefix": "206.223.115.0/24", "in_dfz": true},
        {"id": 2, "protocol": "IPv6", "prefix": "2001:504:0:2::/64", "in_dfz": true},
        {"id": 3, "protocol": "IPX", "prefix": "206.223.116.0/24", "in_dfz": false}
    ]}
]}"#;

struct CannedFeeds(HashMap<&'static str, &'static str>);

impl CannedFeeds {
    fn all() -> CannedFeeds {
        CannedFeeds(HashMap::from([
            (CYMRU_FULLBOGONS_V4_URL, CYMRU_V4),
            (CYMRU_FULLBOGONS_V6_URL, CYMRU_V6),
            (NRO_DELEGATED_EXTENDED_URL, NRO),
            (PEERINGDB_IXLAN_URL, IXLAN),
        ]))
    }

    fn without(mut self, url: &str) -> CannedFeeds {
        self.0.remove(url);
        self
    }
}

impl FeedFetcher for CannedFeeds {
    fn fetch_text(&self, url: &str) -> Result<String, BogonsError> {
        match self.0.get(url) {
            Some(body) => Ok(body.to_string()),
            None => Err(BogonsError::Fetch {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

#[test]
fn nro_with_ixp_lans() {
    let generated = SlurmGenerator::new(CannedFeeds::all())
        .add_source(Source::nro())
        .add_source(Source::ixp_lan())
        .generate()
        .unwrap();

    assert_eq!(generated.warnings.len(), 1);
    assert_eq!(
        serde_json::to_value(&generated.document).unwrap(),
        json!({
            "slurmVersion": 1,
            "validationOutputFilters": {"prefixFilters": [], "bgpsecFilters": []},
            "locallyAddedAssertions": {
                "prefixAssertions": [
                    {"asn": 0, "prefix": "0.0.0.1/32", "maxPrefixLength": 32},
                    {"asn": 0, "prefix": "0.0.0.2/31", "maxPrefixLength": 32},
                    {"asn": 0, "prefix": "192.0.2.0/24", "maxPrefixLength": 32},
                    {"asn": 0, "prefix": "2001:db8::/32", "maxPrefixLength": 128},
                    {"asn": 0, "prefix": "206.223.115.0/24", "maxPrefixLength": 32},
                    {"asn": 0, "prefix": "2001:504:0:2::/64", "maxPrefixLength": 128}
                ],
                "bgpsecAssertions": []
            }
        })
    );
}

#[test]
fn cymru_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slurm.json");

    let generated = SlurmGenerator::new(CannedFeeds::all())
        .add_source(Source::cymru())
        .generate()
        .unwrap();
    write_document(&generated.document, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let doc: SlurmDocument = serde_json::from_str(&written).unwrap();
    let prefixes = doc
        .prefix_assertions()
        .iter()
        .map(|a| (a.prefix.to_string(), a.max_prefix_length))
        .collect::<Vec<_>>();
    assert_eq!(
        prefixes,
        vec![
            ("0.0.0.0/8".to_string(), 32),
            ("10.0.0.0/8".to_string(), 32),
            ("100.64.0.0/10".to_string(), 32),
            ("2001:db8::/32".to_string(), 128),
        ]
    );
    assert!(written.contains("\n  \"locallyAddedAssertions\": {\n    \"prefixAssertions\": [\n"));
}

#[test]
fn repeated_runs_are_identical() {
    let run = || {
        SlurmGenerator::new(CannedFeeds::all())
            .add_source(Source::cymru())
            .add_source(Source::ixp_lan())
            .generate()
            .unwrap()
            .document
            .to_json_pretty()
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn failing_source_aborts_run() {
    let err = SlurmGenerator::new(CannedFeeds::all().without(CYMRU_FULLBOGONS_V6_URL))
        .add_source(Source::cymru())
        .add_source(Source::ixp_lan())
        .generate()
        .unwrap_err();
    assert!(err.is_fetch_error());
    assert!(err.to_string().contains("fullbogons-ipv6"));
}

#[test]
fn partial_run_keeps_other_sources() {
    let generated = SlurmGenerator::new(CannedFeeds::all().without(PEERINGDB_IXLAN_URL))
        .add_source(Source::nro())
        .add_source(Source::ixp_lan())
        .allow_partial(true)
        .generate()
        .unwrap();
    assert_eq!(generated.document.prefix_assertions().len(), 4);
    assert_eq!(generated.failed.len(), 1);
    assert_eq!(generated.failed[0].0.name(), "ixp-lan");
}

#[test]
fn malformed_feed_is_not_skipped() {
    struct Broken;
    impl FeedFetcher for Broken {
        fn fetch_text(&self, _url: &str) -> Result<String, BogonsError> {
            Ok("nro|ZZ|ipv4|192.0.2.0|256|20200101|available\nnro|ZZ|ipv4|truncated\n".to_string())
        }
    }

    let result = SlurmGenerator::new(Broken)
        .add_source(Source::nro())
        .generate();
    assert!(matches!(
        result,
        Err(BogonsError::FeedFormat { line: 2, .. })
    ));
}
