use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use vpplink_api::binapi::ip_types::IpProto as WireProto;

pub use vpplink_api::binapi::nat::NatConfigFlags as NatFlags;

use super::ParseError;

/// Transport protocol of a service mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpProto {
    Tcp,
    Udp,
    Sctp,
    Icmp,
    Icmp6,
}

impl IpProto {
    pub fn to_wire(self) -> WireProto {
        match self {
            IpProto::Tcp => WireProto::Tcp,
            IpProto::Udp => WireProto::Udp,
            IpProto::Sctp => WireProto::Sctp,
            IpProto::Icmp => WireProto::Icmp,
            IpProto::Icmp6 => WireProto::Icmp6,
        }
    }

    /// Protocol number as carried in `u8` protocol fields.
    pub fn number(self) -> u8 {
        self.to_wire() as u8
    }
}

impl fmt::Display for IpProto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IpProto::Tcp => "TCP",
            IpProto::Udp => "UDP",
            IpProto::Sctp => "SCTP",
            IpProto::Icmp => "ICMP",
            IpProto::Icmp6 => "ICMP6",
        })
    }
}

impl FromStr for IpProto {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(IpProto::Tcp),
            "udp" => Ok(IpProto::Udp),
            "sctp" => Ok(IpProto::Sctp),
            "icmp" => Ok(IpProto::Icmp),
            "icmp6" => Ok(IpProto::Icmp6),
            _ => Err(ParseError::Proto(s.to_string())),
        }
    }
}

/// A NAT44 service: one external endpoint balanced over backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nat44Entry {
    pub service_ip: Ipv4Addr,
    pub service_port: u16,
    pub protocol: IpProto,
    pub backend_ips: Vec<Ipv4Addr>,
    pub backend_port: u16,
}

impl fmt::Display for Nat44Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{} -> {:?}:{}",
            self.protocol, self.service_ip, self.service_port, self.backend_ips, self.backend_port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_numbers() {
        assert_eq!(IpProto::Tcp.number(), 6);
        assert_eq!(IpProto::Udp.number(), 17);
        assert_eq!(IpProto::Sctp.number(), 132);
        assert_eq!(IpProto::Icmp6.number(), 58);
    }

    #[test]
    fn protocol_parse_is_case_insensitive() {
        assert_eq!("UDP".parse::<IpProto>().unwrap(), IpProto::Udp);
        assert_eq!("tcp".parse::<IpProto>().unwrap(), IpProto::Tcp);
        assert!("gre".parse::<IpProto>().is_err());
    }

    #[test]
    fn entry_display() {
        let entry = Nat44Entry {
            service_ip: Ipv4Addr::new(10, 96, 0, 10),
            service_port: 53,
            protocol: IpProto::Udp,
            backend_ips: vec![Ipv4Addr::new(10, 0, 0, 5)],
            backend_port: 5353,
        };
        assert_eq!(entry.to_string(), "UDP 10.96.0.10:53 -> [10.0.0.5]:5353");
    }
}
