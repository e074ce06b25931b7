use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use vpplink_api::binapi::ip_types::{Address, AddressFamily, AddressUnion, Prefix};

use super::ParseError;

/// An address with a prefix length, e.g. `10.0.0.0/24` or `fd00::1/128`.
///
/// Host bits are kept as given; interface addresses rely on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpPrefix {
    addr: IpAddr,
    len: u8,
}

impl IpPrefix {
    /// Fails if `len` exceeds the address width.
    pub fn new(addr: IpAddr, len: u8) -> Result<Self, ParseError> {
        let max = max_len(&addr);
        if len > max {
            return Err(ParseError::Prefix {
                input: format!("{addr}/{len}"),
                reason: format!("length exceeds {max}"),
            });
        }
        Ok(Self { addr, len })
    }

    /// A full-length prefix covering exactly `addr`.
    pub fn host(addr: IpAddr) -> Self {
        Self {
            addr,
            len: max_len(&addr),
        }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    pub fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }

    pub fn to_wire(&self) -> Prefix {
        Prefix {
            address: ip_to_wire(self.addr),
            len: self.len,
        }
    }

    /// Lengths beyond the address width are clamped.
    pub fn from_wire(prefix: &Prefix) -> Self {
        let addr = ip_from_wire(&prefix.address);
        Self {
            addr,
            len: prefix.len.min(max_len(&addr)),
        }
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl FromStr for IpPrefix {
    type Err = ParseError;

    /// A bare address parses as a host prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ParseError::Prefix {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let s = s.trim();
        match s.split_once('/') {
            Some((addr, len)) => {
                let addr: IpAddr = addr.parse().map_err(|_| invalid("bad address"))?;
                let len: u8 = len.parse().map_err(|_| invalid("bad length"))?;
                Self::new(addr, len)
            }
            None => {
                let addr: IpAddr = s.parse().map_err(|_| invalid("bad address"))?;
                Ok(Self::host(addr))
            }
        }
    }
}

fn max_len(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// An Ethernet hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.trim().split([':', '-']);
        for octet in &mut octets {
            let part = parts.next().ok_or_else(|| ParseError::Mac(s.to_string()))?;
            if part.len() != 2 {
                return Err(ParseError::Mac(s.to_string()));
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| ParseError::Mac(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(ParseError::Mac(s.to_string()));
        }
        Ok(Self(octets))
    }
}

/// An address configured on an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfAddress {
    pub sw_if_index: u32,
    pub prefix: IpPrefix,
}

/// IPv4 addresses occupy the first four bytes of the union.
pub fn ip_to_union(addr: IpAddr) -> AddressUnion {
    let mut un = [0u8; 16];
    match addr {
        IpAddr::V4(v4) => un[..4].copy_from_slice(&v4.octets()),
        IpAddr::V6(v6) => un = v6.octets(),
    }
    un
}

pub fn ip_from_union(un: &AddressUnion, is_ipv6: bool) -> IpAddr {
    if is_ipv6 {
        IpAddr::V6(Ipv6Addr::from(*un))
    } else {
        IpAddr::V4(Ipv4Addr::new(un[0], un[1], un[2], un[3]))
    }
}

pub fn ip_to_wire(addr: IpAddr) -> Address {
    let af = match addr {
        IpAddr::V4(_) => AddressFamily::Ip4,
        IpAddr::V6(_) => AddressFamily::Ip6,
    };
    Address {
        af,
        un: ip_to_union(addr),
    }
}

pub fn ip_from_wire(address: &Address) -> IpAddr {
    ip_from_union(&address.un, address.af == AddressFamily::Ip6)
}
