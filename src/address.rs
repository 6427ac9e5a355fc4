use std::fmt;

use crate::error::GenerateError;

/// Address family of a CIDR-form interface address, judged by its shape
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AddressFamily {
    IPv4,
    IPv6,
    Invalid,
}

impl AddressFamily {
    /// IPv4 if the address contains a '.', IPv6 if it contains a ':'
    // Dotted-quad wins, so IPv4-mapped IPv6 ("::ffff:1.2.3.4") classifies as IPv4
    pub fn classify(address: &str) -> Self {
        if address.contains('.') {
            AddressFamily::IPv4
        } else if address.contains(':') {
            AddressFamily::IPv6
        } else {
            AddressFamily::Invalid
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use AddressFamily::*;
        let display = match self {
            IPv4 => "IPv4",
            IPv6 => "IPv6",
            Invalid => "Invalid",
        };
        write!(f, "{}", display)
    }
}

/// Render the zebra interface statement for an address
/// E.g. "10.0.0.1/24" -> "ip address 10.0.0.1/24"
pub fn render_statement(address: &str) -> Result<String, GenerateError> {
    match AddressFamily::classify(address) {
        AddressFamily::IPv4 => Ok(format!("ip address {}", address)),
        AddressFamily::IPv6 => Ok(format!("ipv6 address {}", address)),
        AddressFamily::Invalid => Err(GenerateError::InvalidAddress(address.to_string())),
    }
}

/// Strip the prefix length from a CIDR address, if present
pub fn host_part(address: &str) -> &str {
    address.split('/').next().unwrap_or(address)
}
