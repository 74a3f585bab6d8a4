use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// ASN -- Autonomous System Number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(pub u32);

impl Asn {
    /// AS0, which may never originate a route.
    ///
    /// <https://datatracker.ietf.org/doc/rfc7607/>
    pub const RESERVED: Asn = Asn(0);
}

impl From<u32> for Asn {
    fn from(v: u32) -> Self {
        Asn(v)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.0
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved() {
        assert_eq!(Asn::RESERVED, Asn::from(0));
        assert_eq!(u32::from(Asn::RESERVED), 0);
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&Asn::RESERVED).unwrap(), "0");
        let asn: Asn = serde_json::from_str("64496").unwrap();
        assert_eq!(asn, Asn(64496));
        assert_eq!(asn.to_string(), "64496");
    }
}
