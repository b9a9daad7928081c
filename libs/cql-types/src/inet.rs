use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::{Result, ValueError};
use crate::hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Inet(IpAddr);

impl Inet {
    pub fn new(addr: IpAddr) -> Self {
        Self(addr)
    }

    pub fn address(&self) -> String {
        self.0.to_string()
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }

    pub fn hash_code(&self) -> u64 {
        match self.0 {
            IpAddr::V4(v4) => hash::bytes_hash(&v4.octets()),
            IpAddr::V6(v6) => hash::bytes_hash(&v6.octets()),
        }
    }
}

impl FromStr for Inet {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<IpAddr>()
            .map(Self)
            .map_err(|e| ValueError::from(e).with_context(format_args!("Invalid IP address: '{s}'")))
    }
}

impl fmt::Display for Inet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_both_families() {
        assert_eq!("127.0.0.1".parse::<Inet>().unwrap().address(), "127.0.0.1");
        assert_eq!("::1".parse::<Inet>().unwrap().address(), "::1");
    }

    #[test]
    fn garbage_is_invalid_argument() {
        let err = "300.1.1.1".parse::<Inet>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.message().starts_with("Invalid IP address: '300.1.1.1'"));
    }
}
