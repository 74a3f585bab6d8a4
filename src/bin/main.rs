use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser};
use itertools::Itertools;
use log::warn;
use rpki_as0_bogons::models::MaxPrefixLengths;
use rpki_as0_bogons::source::*;
use rpki_as0_bogons::write_document;

const DEFAULT_OUTPUT_FILE: &str = "/usr/local/etc/slurm.json";

/// rpki-as0-bogons generates a SLURM file with AS0 prefix assertions for all bogons.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(group(ArgGroup::new("bogons").required(true).args(["nro", "cymru"])))]
struct Opts {
    /// File to be created with all the SLURM content
    #[clap(short = 'f', long = "file", default_value = DEFAULT_OUTPUT_FILE)]
    dest_file: PathBuf,

    /// Print the document to stdout instead of writing the file
    #[clap(long)]
    stdout: bool,

    /// Use the NRO delegated stats
    #[clap(short = 'N', long)]
    nro: bool,

    /// Use the Team Cymru's bogons list
    #[clap(short = 'C', long)]
    cymru: bool,

    /// Include the list of IXP LANs from PeeringDB. Overlapping ROAs are fine, so they are
    /// generated even if some LANs already have AS0 ROAs.
    #[clap(short = 'P', long = "peeringdb")]
    peeringdb_lans: bool,

    /// Maximum prefix length for IPv4 IXP LAN assertions
    #[clap(long, default_value_t = 32, value_parser = clap::value_parser!(u8).range(0..=32))]
    ixp_max_v4: u8,

    /// Maximum prefix length for IPv6 IXP LAN assertions
    #[clap(long, default_value_t = 128, value_parser = clap::value_parser!(u8).range(0..=128))]
    ixp_max_v6: u8,

    /// Write whatever sources succeeded instead of failing when one of them cannot be used
    #[clap(long)]
    allow_partial: bool,

    #[clap(flatten)]
    urls: Urls,
}

#[derive(Args, Debug)]
struct Urls {
    /// NRO delegated-extended statistics URL
    #[clap(long, default_value = NRO_DELEGATED_EXTENDED_URL)]
    nro_url: String,

    /// Team Cymru IPv4 full bogons URL
    #[clap(long, default_value = CYMRU_FULLBOGONS_V4_URL)]
    cymru_v4_url: String,

    /// Team Cymru IPv6 full bogons URL
    #[clap(long, default_value = CYMRU_FULLBOGONS_V6_URL)]
    cymru_v6_url: String,

    /// PeeringDB IXP LAN URL
    #[clap(long, default_value = PEERINGDB_IXLAN_URL)]
    peeringdb_url: String,
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let mut generator = SlurmGenerator::remote().allow_partial(opts.allow_partial);
    if opts.nro {
        generator = generator.add_source(Source::Nro {
            url: opts.urls.nro_url.clone(),
        });
    }
    if opts.cymru {
        generator = generator.add_source(Source::Cymru {
            v4_url: opts.urls.cymru_v4_url.clone(),
            v6_url: opts.urls.cymru_v6_url.clone(),
        });
    }
    if opts.peeringdb_lans {
        generator = generator.add_source(Source::IxpLan {
            url: opts.urls.peeringdb_url.clone(),
            max_lengths: MaxPrefixLengths::new(opts.ixp_max_v4, opts.ixp_max_v6),
        });
    }

    let generated = match generator.generate() {
        Ok(g) => g,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    if !generated.warnings.is_empty() {
        warn!("{} IXP LAN entries skipped or adjusted", generated.warnings.len());
    }
    if !generated.failed.is_empty() {
        warn!(
            "sources left out: {}",
            generated.failed.iter().map(|(s, _)| s.name()).join(", ")
        );
    }

    if opts.stdout {
        match generated.document.to_json_pretty() {
            Ok(s) => println!("{}", s),
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(err) = write_document(&generated.document, &opts.dest_file) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
