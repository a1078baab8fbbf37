//! Built-in special-use address tables.
//!
//! These are always subtracted last, after the national lists and any
//! operator exclusions. The tables are returned as owned values so callers
//! hold an explicit per-run exclusion set; there is no mutable global state.

use crate::models::Prefix;

/// Special-use IPv4 blocks: loopback, private, link-local, documentation,
/// multicast, benchmarking, CGNAT and friends.
const RESERVED_IPV4: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "100.64.0.0/10",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.0.0.0/29",
    "192.0.0.170/31",
    "192.0.2.0/24",
    "192.168.0.0/16",
    "198.18.0.0/15",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "224.0.0.0/4",
    "240.0.0.0/4",
    "255.255.255.255/32",
];

/// The fixed IPv4 reserved table.
pub fn reserved_ipv4() -> Vec<Prefix> {
    RESERVED_IPV4
        .iter()
        .map(|s| Prefix::new(s).expect("built-in reserved entry must parse"))
        .collect()
}

/// The IPv6 analogue; currently empty.
pub fn reserved_ipv6() -> Vec<Prefix> {
    Vec::new()
}
