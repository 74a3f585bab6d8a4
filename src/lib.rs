/*!
rpki-as0-bogons turns public registry feeds into an RPKI SLURM file that asserts origin AS0 for
address space which should never be routed.

Three feeds are supported:
- Team Cymru full bogon lists (IPv4 and IPv6 text files, one prefix per line),
- the NRO extended delegation statistics, where every `available`, `reserved`, `ianapool` or
  `ietf` block becomes a bogon (IPv4 ranges are summarized into CIDR blocks),
- PeeringDB IXP LAN prefixes.

# Examples

Generate a document from the NRO feed and the IXP LANs, and write it out:

```no_run
use rpki_as0_bogons::{write_document, SlurmGenerator, Source};
use std::path::Path;

let generated = SlurmGenerator::remote()
    .add_source(Source::nro())
    .add_source(Source::ixp_lan())
    .generate()
    .unwrap();
write_document(&generated.document, Path::new("/usr/local/etc/slurm.json")).unwrap();
```

The building blocks can be used directly as well:

```
use rpki_as0_bogons::models::{build_assertions, MaxPrefixLengths, SlurmDocument};
use rpki_as0_bogons::summarize_range;

let networks = summarize_range("0.0.0.1".parse().unwrap(), "0.0.0.3".parse().unwrap()).unwrap();
assert_eq!(networks.len(), 2);

let document = SlurmDocument::assemble(vec![build_assertions(networks, MaxPrefixLengths::default())]);
assert_eq!(document.prefix_assertions()[0].prefix.to_string(), "0.0.0.1/32");
```
*/
pub mod error;
pub mod io;
pub mod models;
pub mod parser;
pub mod source;

pub use error::{BogonsError, FeedKind, InvalidRangeError};
#[cfg(feature = "remote")]
pub use io::OneIoFetcher;
pub use io::{write_document, FeedFetcher};
pub use models::{summarize_range, AddressRange, PrefixAssertion, SlurmDocument};
pub use parser::ParseWarning;
pub use source::{Generated, SlurmGenerator, Source};
