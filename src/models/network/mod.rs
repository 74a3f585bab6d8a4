//! Common network-related structs.

mod afi;
mod asn;
mod range;

pub use afi::*;
pub use asn::*;
pub use range::*;
