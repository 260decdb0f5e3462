use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use super::errors::PrefixError;

//------------ Prefix --------------------------------------------------------

/// An IPv4 address block: the top `len` bits of `addr`.
///
/// The bits of the address beyond `len` are not meaningful. They are zeroed
/// on creation, so that `10.1.2.3/8` and `10.0.0.0/8` are the same prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix {
    addr: u32,
    len: u8,
}

impl Prefix {
    pub const MAX_LEN: u8 = 32;

    pub fn new(addr: u32, len: u8) -> Result<Self, PrefixError> {
        if len > Self::MAX_LEN {
            return Err(PrefixError::LengthInvalid(len));
        }
        Ok(Self {
            addr: addr & Self::mask(len),
            len,
        })
    }

    /// The default route, `0.0.0.0/0`.
    pub fn default_route() -> Self {
        Self { addr: 0, len: 0 }
    }

    /// A host route, covering exactly one address.
    pub fn host(addr: u32) -> Self {
        Self { addr, len: 32 }
    }

    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_default(&self) -> bool {
        self.len == 0
    }

    /// Whether `addr` shares the top `len` bits with this prefix.
    pub fn contains(&self, addr: u32) -> bool {
        addr & Self::mask(self.len) == self.addr
    }

    // The netmask for a prefix length. Shifting a u32 by 32 overflows, so
    // the zero length is special-cased.
    fn mask(len: u8) -> u32 {
        u32::MAX.checked_shl(32 - len as u32).unwrap_or(0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.addr), self.len)
    }
}

impl TryFrom<(u32, u8)> for Prefix {
    type Error = PrefixError;

    fn try_from((addr, len): (u32, u8)) -> Result<Self, Self::Error> {
        Prefix::new(addr, len)
    }
}

impl TryFrom<inetnum::addr::Prefix> for Prefix {
    type Error = PrefixError;

    fn try_from(value: inetnum::addr::Prefix) -> Result<Self, Self::Error> {
        match value.addr() {
            IpAddr::V4(addr) => Prefix::new(addr.into(), value.len()),
            IpAddr::V6(_) => Err(PrefixError::UnsupportedFamily),
        }
    }
}

//------------ RouteEntry ----------------------------------------------------

/// One row of a forwarding table: a prefix and the next-hop that traffic
/// for it is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteEntry {
    pub prefix: Prefix,
    pub next_hop: u32,
}

impl RouteEntry {
    pub fn new(prefix: Prefix, next_hop: u32) -> Self {
        Self { prefix, next_hop }
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}    {}", self.prefix, Ipv4Addr::from(self.next_hop))
    }
}

//------------ RouteMatch ----------------------------------------------------

/// The result of a longest-prefix-match lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch {
    pub next_hop: u32,
    /// The length of the prefix that produced this match.
    pub prefix_len: u8,
    /// The depth of the trie node holding the route, the root being level
    /// zero.
    pub level: u8,
}
