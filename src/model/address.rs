use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const IPV4_PATTERN: &str =
    r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

// Eight full groups only; "::" compression is not accepted.
const IPV6_PATTERN: &str = r"^([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    IPv4,
    IPv6,
    Invalid,
}

impl AddressKind {
    pub fn is_valid(self) -> bool {
        self != AddressKind::Invalid
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::IPv4 => write!(f, "IPv4"),
            AddressKind::IPv6 => write!(f, "IPv6"),
            AddressKind::Invalid => write!(f, "invalid"),
        }
    }
}

fn ipv4_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IPV4_PATTERN).expect("IPv4 pattern compiles"))
}

fn ipv6_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IPV6_PATTERN).expect("IPv6 pattern compiles"))
}

/// Determine whether `candidate` is an IPv4 or IPv6 literal.
///
/// The whole string must match; there is no trimming here.
pub fn classify(candidate: &str) -> AddressKind {
    if ipv4_regex().is_match(candidate) {
        AddressKind::IPv4
    } else if ipv6_regex().is_match(candidate) {
        AddressKind::IPv6
    } else {
        AddressKind::Invalid
    }
}
