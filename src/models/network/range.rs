use crate::error::InvalidRangeError;
use crate::models::network::{addr_to_bits, Afi};
use ipnet::IpNet;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

/// An inclusive range of addresses `[first, last]` within one address family.
///
/// Bounds are kept as integers widened to 128 bits so IPv4 and IPv6 share one summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    afi: Afi,
    first: u128,
    last: u128,
}

impl AddressRange {
    /// Create a range from integer bounds. Fails if `first > last` or `last` does not fit in the
    /// family's address width.
    pub fn new(afi: Afi, first: u128, last: u128) -> Result<AddressRange, InvalidRangeError> {
        if first > last || last > afi.max_value() {
            return Err(InvalidRangeError { afi, first, last });
        }
        Ok(AddressRange { afi, first, last })
    }

    /// Create a range from two addresses of the same family.
    pub fn from_addrs(first: IpAddr, last: IpAddr) -> Result<AddressRange, InvalidRangeError> {
        let afi = Afi::from(first);
        if afi != Afi::from(last) {
            return Err(InvalidRangeError {
                afi,
                first: addr_to_bits(first),
                last: addr_to_bits(last),
            });
        }
        AddressRange::new(afi, addr_to_bits(first), addr_to_bits(last))
    }

    /// Create the range of `count` addresses starting at `start`, i.e. `[start, start + count - 1]`.
    pub fn from_start_count(start: IpAddr, count: u128) -> Result<AddressRange, InvalidRangeError> {
        let afi = Afi::from(start);
        let first = addr_to_bits(start);
        match count
            .checked_sub(1)
            .and_then(|offset| first.checked_add(offset))
        {
            Some(last) => AddressRange::new(afi, first, last),
            None => Err(InvalidRangeError {
                afi,
                first,
                last: first.wrapping_add(count).wrapping_sub(1),
            }),
        }
    }

    pub fn afi(&self) -> Afi {
        self.afi
    }

    pub fn first(&self) -> u128 {
        self.first
    }

    pub fn last(&self) -> u128 {
        self.last
    }

    /// Iterate over the minimal sequence of CIDR blocks covering exactly this range, in
    /// increasing address order.
    pub fn subnets(&self) -> Subnets {
        Subnets {
            afi: self.afi,
            next: Some(self.first),
            last: self.last,
        }
    }

    pub fn to_networks(&self) -> Vec<IpNet> {
        self.subnets().collect()
    }
}

impl From<IpNet> for AddressRange {
    fn from(net: IpNet) -> Self {
        let afi = Afi::from(&net);
        AddressRange {
            afi,
            first: addr_to_bits(net.network()),
            last: addr_to_bits(net.broadcast()),
        }
    }
}

impl Display for AddressRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (
            self.afi.addr_from_bits(self.first),
            self.afi.addr_from_bits(self.last),
        ) {
            (Some(first), Some(last)) => write!(f, "{} - {}", first, last),
            _ => write!(f, "{} - {}", self.first, self.last),
        }
    }
}

/// Iterator produced by [AddressRange::subnets].
///
/// Each step emits the largest block that is both aligned at the current start address and does
/// not run past the end of the range, then advances past it.
#[derive(Debug, Clone)]
pub struct Subnets {
    afi: Afi,
    next: Option<u128>,
    last: u128,
}

impl Iterator for Subnets {
    type Item = IpNet;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let width = self.afi.bits() as u32;

        // alignment: a block at `start` can hold at most 2^trailing_zeros addresses
        let align_bits = start.trailing_zeros().min(width);
        // size: the block must not run past `last`
        let size_bits = match (self.last - start).checked_add(1) {
            Some(count) => 127 - count.leading_zeros(),
            None => 128,
        };
        let host_bits = align_bits.min(size_bits);

        self.next = 1u128
            .checked_shl(host_bits)
            .and_then(|size| start.checked_add(size))
            .filter(|next| *next <= self.last);

        // prefix length never exceeds the family width here
        let addr = self.afi.addr_from_bits(start)?;
        IpNet::new(addr, (width - host_bits) as u8).ok()
    }
}

/// Summarize the inclusive range `[first, last]` into CIDR blocks.
pub fn summarize_range(first: IpAddr, last: IpAddr) -> Result<Vec<IpNet>, InvalidRangeError> {
    Ok(AddressRange::from_addrs(first, last)?.to_networks())
}
