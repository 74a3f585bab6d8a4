use ipnet::IpNet;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// AFI -- Address Family Identifier
///
/// Only the two families that carry routable address space are represented.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub enum Afi {
    Ipv4,
    Ipv6,
}

impl Afi {
    /// Address width in bits: 32 for IPv4, 128 for IPv6.
    #[inline]
    pub const fn bits(&self) -> u8 {
        match self {
            Afi::Ipv4 => 32,
            Afi::Ipv6 => 128,
        }
    }

    /// Largest address value representable in this family.
    #[inline]
    pub const fn max_value(&self) -> u128 {
        match self {
            Afi::Ipv4 => u32::MAX as u128,
            Afi::Ipv6 => u128::MAX,
        }
    }

    /// Convert an integer back into an address of this family, if it fits.
    pub fn addr_from_bits(&self, value: u128) -> Option<IpAddr> {
        match self {
            Afi::Ipv4 => u32::try_from(value)
                .ok()
                .map(|v| IpAddr::V4(Ipv4Addr::from(v))),
            Afi::Ipv6 => Some(IpAddr::V6(Ipv6Addr::from(value))),
        }
    }
}

/// Integer value of an address, widened to 128 bits.
#[inline]
pub fn addr_to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(v4) as u128,
        IpAddr::V6(v6) => u128::from(v6),
    }
}

impl Display for Afi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Afi::Ipv4 => write!(f, "ipv4"),
            Afi::Ipv6 => write!(f, "ipv6"),
        }
    }
}

impl From<IpAddr> for Afi {
    #[inline]
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(_) => Afi::Ipv4,
            IpAddr::V6(_) => Afi::Ipv6,
        }
    }
}

impl From<&IpNet> for Afi {
    #[inline]
    fn from(value: &IpNet) -> Self {
        match value {
            IpNet::V4(_) => Afi::Ipv4,
            IpNet::V6(_) => Afi::Ipv6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_afi_from() {
        assert_eq!(
            Afi::from(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            Afi::Ipv4
        );
        assert_eq!(
            Afi::from(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))),
            Afi::Ipv6
        );
        assert_eq!(
            Afi::from(&IpNet::from_str("2001:db8::/32").unwrap()),
            Afi::Ipv6
        );
    }

    #[test]
    fn test_bits_conversion() {
        let addr = IpAddr::from_str("10.0.0.1").unwrap();
        let bits = addr_to_bits(addr);
        assert_eq!(bits, 0x0a00_0001);
        assert_eq!(Afi::Ipv4.addr_from_bits(bits), Some(addr));
        assert_eq!(Afi::Ipv4.addr_from_bits(1 << 32), None);
        assert_eq!(
            Afi::Ipv6.addr_from_bits(u128::MAX),
            Some(IpAddr::from_str("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff").unwrap())
        );
    }
}
