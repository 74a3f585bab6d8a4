/*!
parser module turns the raw bodies of the supported feeds into normalized networks and AS0
prefix assertions.
*/
pub(crate) mod utils;

pub mod cymru;
pub mod ixp;
pub mod nro;

pub use cymru::parse_cymru_bogons;
pub use ixp::{parse_ixp_lans, parse_ixp_lans_str, IxpLanReport, ParseWarning};
pub use nro::{parse_delegations, parse_nro_assertions, DelegationFeed};
