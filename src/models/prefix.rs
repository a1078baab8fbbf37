//! CIDR prefix value type and bit-level subnet math.
//!
//! Provides [`Prefix`] for representing an IPv4 or IPv6 network in canonical
//! form (host bits zero), along with the containment and split operations the
//! subtraction pass is built on.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Maximum prefix length for an IPv4 network (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 network (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Address family of a [`Prefix`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Family {
    V4,
    V6,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Family::V4 => write!(f, "ipv4"),
            Family::V6 => write!(f, "ipv6"),
        }
    }
}

/// Errors produced by [`Prefix`] construction and splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    /// `split` was asked for a target that is not strictly contained, or the
    /// families do not match. A logic bug in the caller, not a data problem.
    InvalidSplit(String),
    /// A textual CIDR or a delegation count could not be turned into a valid
    /// canonical prefix.
    MalformedPrefix(String),
}

impl std::fmt::Display for PrefixError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PrefixError::InvalidSplit(msg) => write!(f, "invalid split: {msg}"),
            PrefixError::MalformedPrefix(msg) => write!(f, "malformed prefix: {msg}"),
        }
    }
}

impl std::error::Error for PrefixError {}

/// An IPv4 or IPv6 network address with prefix length, always canonical.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Prefix {
    /// The network address (host bits are all zero).
    pub addr: IpAddr,
    /// The prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub len: u8,
}

/// Zero the lowest `host_bits` bits of `bits`.
fn network_bits(bits: u128, host_bits: u32) -> u128 {
    if host_bits >= 128 {
        0
    } else {
        (bits >> host_bits) << host_bits
    }
}

impl Prefix {
    /// Create a [`Prefix`] from a CIDR string (e.g. "10.0.0.0/8" or "2000::/3").
    ///
    /// The address must be the network address of the block; host bits set
    /// beyond the prefix length are rejected rather than silently masked.
    pub fn new(addr_cidr: &str) -> Result<Prefix, PrefixError> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(PrefixError::MalformedPrefix(format!(
                "invalid CIDR format: {addr_cidr}"
            )));
        }
        let addr: IpAddr = parts[0]
            .parse()
            .map_err(|_| PrefixError::MalformedPrefix(format!("invalid address: {}", parts[0])))?;
        let len: u8 = parts[1]
            .parse()
            .map_err(|_| PrefixError::MalformedPrefix(format!("invalid length: {}", parts[1])))?;
        Prefix::from_parts(addr, len)
    }

    /// Create a [`Prefix`] from an already-parsed address and length.
    pub fn from_parts(addr: IpAddr, len: u8) -> Result<Prefix, PrefixError> {
        let prefix = Prefix { addr, len };
        if len > prefix.max_len() {
            return Err(PrefixError::MalformedPrefix(format!(
                "length /{len} is too long for {}",
                prefix.family()
            )));
        }
        let bits = prefix.bits();
        if network_bits(bits, (prefix.max_len() - len) as u32) != bits {
            return Err(PrefixError::MalformedPrefix(format!(
                "{addr}/{len} has host bits set"
            )));
        }
        Ok(prefix)
    }

    /// Create a [`Prefix`] from a starting address and an address count, as
    /// used by RIR delegation records.
    ///
    /// The count must be an exact power of two; the length is derived with
    /// integer bit operations, never a floating-point logarithm.
    pub fn from_count(addr: IpAddr, count: u64) -> Result<Prefix, PrefixError> {
        if count == 0 || !count.is_power_of_two() {
            return Err(PrefixError::MalformedPrefix(format!(
                "address count {count} is not a power of two"
            )));
        }
        let host_bits = count.trailing_zeros() as u8;
        let max_len = match addr {
            IpAddr::V4(_) => MAX_LENGTH_V4,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        };
        if host_bits > max_len {
            return Err(PrefixError::MalformedPrefix(format!(
                "address count {count} is too large for {addr}"
            )));
        }
        Prefix::from_parts(addr, max_len - host_bits)
    }

    /// The address family of this prefix.
    pub fn family(&self) -> Family {
        match self.addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }

    /// Maximum prefix length for this family (32 or 128).
    pub fn max_len(&self) -> u8 {
        match self.addr {
            IpAddr::V4(_) => MAX_LENGTH_V4,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        }
    }

    /// Number of addresses covered by this prefix.
    pub fn num_addresses(&self) -> u128 {
        1u128
            .checked_shl((self.max_len() - self.len) as u32)
            .unwrap_or(u128::MAX)
    }

    /// The address as raw bits, IPv4 mapped into the low 32 bits.
    fn bits(&self) -> u128 {
        match self.addr {
            IpAddr::V4(a) => u32::from(a) as u128,
            IpAddr::V6(a) => u128::from(a),
        }
    }

    /// Build a sibling prefix in the same family from raw bits.
    fn with_bits(&self, bits: u128, len: u8) -> Prefix {
        let addr = match self.addr {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(bits as u32)),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(bits)),
        };
        Prefix { addr, len }
    }

    /// True iff `other`'s address range is fully inside this prefix's range.
    ///
    /// Mismatched families compare as not-contained; exclusion sources
    /// legitimately reference space outside the configured base allocation,
    /// so callers treat that as a no-op rather than an error.
    pub fn contains(&self, other: &Prefix) -> bool {
        if self.family() != other.family() || self.len > other.len {
            return false;
        }
        network_bits(other.bits(), (self.max_len() - self.len) as u32) == self.bits()
    }

    /// Bisect this prefix into its two equal halves, one level down.
    fn halves(&self) -> (Prefix, Prefix) {
        let len = self.len + 1;
        let half_size = 1u128 << (self.max_len() - len) as u32;
        let lo = self.with_bits(self.bits(), len);
        let hi = self.with_bits(self.bits() + half_size, len);
        (lo, hi)
    }

    /// Compute the minimal list of sibling prefixes whose union is
    /// `self \ exclude`.
    ///
    /// Repeatedly bisects, keeping the half that does not contain `exclude`
    /// and descending into the half that does, until the bisected length
    /// reaches `exclude`'s length. The half equal to `exclude` itself is not
    /// emitted; it is the caller's exclusion target. Output follows bisection
    /// order (coarsest sibling first).
    pub fn split(&self, exclude: &Prefix) -> Result<Vec<Prefix>, PrefixError> {
        if self.family() != exclude.family() {
            return Err(PrefixError::InvalidSplit(format!(
                "family mismatch: {self} vs {exclude}"
            )));
        }
        if self == exclude || !self.contains(exclude) {
            return Err(PrefixError::InvalidSplit(format!(
                "{self} does not strictly contain {exclude}"
            )));
        }
        let mut siblings = Vec::with_capacity((exclude.len - self.len) as usize);
        let mut current = *self;
        while current.len < exclude.len {
            let (lo, hi) = current.halves();
            if lo.contains(exclude) {
                siblings.push(hi);
                current = lo;
            } else {
                siblings.push(lo);
                current = hi;
            }
        }
        Ok(siblings)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.len);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::new(&s).map_err(|e| de::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v4() {
        let p = Prefix::new("10.0.0.0/8").unwrap();
        assert_eq!(p.addr, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)));
        assert_eq!(p.len, 8);
        assert_eq!(p.family(), Family::V4);
        assert_eq!(p.max_len(), 32);
    }

    #[test]
    fn test_new_v6() {
        let p = Prefix::new("2000::/3").unwrap();
        assert_eq!(p.len, 3);
        assert_eq!(p.family(), Family::V6);
        assert_eq!(p.max_len(), 128);
        assert_eq!(p.to_string(), "2000::/3");
    }

    #[test]
    fn test_new_rejects_malformed() {
        assert!(matches!(
            Prefix::new("10.0.0.0"),
            Err(PrefixError::MalformedPrefix(_))
        ));
        assert!(matches!(
            Prefix::new("10.0.0.x/8"),
            Err(PrefixError::MalformedPrefix(_))
        ));
        assert!(matches!(
            Prefix::new("10.0.0.0/33"),
            Err(PrefixError::MalformedPrefix(_))
        ));
        assert!(matches!(
            Prefix::new("2000::/129"),
            Err(PrefixError::MalformedPrefix(_))
        ));
        // Host bits set: not the network address of the block.
        assert!(matches!(
            Prefix::new("10.0.0.1/8"),
            Err(PrefixError::MalformedPrefix(_))
        ));
    }

    #[test]
    fn test_from_count() {
        let addr: IpAddr = "27.8.0.0".parse().unwrap();
        let p = Prefix::from_count(addr, 131072).unwrap();
        assert_eq!(p, Prefix::new("27.8.0.0/15").unwrap());

        let addr: IpAddr = "1.0.1.0".parse().unwrap();
        let p = Prefix::from_count(addr, 256).unwrap();
        assert_eq!(p, Prefix::new("1.0.1.0/24").unwrap());
    }

    #[test]
    fn test_from_count_rejects_non_power_of_two() {
        let addr: IpAddr = "1.0.1.0".parse().unwrap();
        assert!(matches!(
            Prefix::from_count(addr, 0),
            Err(PrefixError::MalformedPrefix(_))
        ));
        assert!(matches!(
            Prefix::from_count(addr, 768),
            Err(PrefixError::MalformedPrefix(_))
        ));
        assert!(matches!(
            Prefix::from_count(addr, 255),
            Err(PrefixError::MalformedPrefix(_))
        ));
    }

    #[test]
    fn test_contains() {
        let eight = Prefix::new("10.0.0.0/8").unwrap();
        let twentyfour = Prefix::new("10.1.2.0/24").unwrap();
        assert!(eight.contains(&twentyfour));
        assert!(!twentyfour.contains(&eight));
        assert!(eight.contains(&eight));
        assert!(!eight.contains(&Prefix::new("11.0.0.0/24").unwrap()));
    }

    #[test]
    fn test_contains_family_mismatch_is_false() {
        let v4 = Prefix::new("10.0.0.0/8").unwrap();
        let v6 = Prefix::new("2000::/3").unwrap();
        assert!(!v4.contains(&v6));
        assert!(!v6.contains(&v4));
    }

    #[test]
    fn test_split_chain_length() {
        // /8 around a /24 bisects 16 times, one sibling per step.
        let base = Prefix::new("10.0.0.0/8").unwrap();
        let exclude = Prefix::new("10.1.2.0/24").unwrap();
        let siblings = base.split(&exclude).unwrap();
        assert_eq!(siblings.len(), 16);

        // None overlaps the exclusion or each other; union is base minus exclude.
        let mut total: u128 = 0;
        for (i, s) in siblings.iter().enumerate() {
            assert!(!s.contains(&exclude), "{s} overlaps exclusion");
            assert!(!exclude.contains(s), "{s} inside exclusion");
            assert!(base.contains(s), "{s} outside base");
            for other in siblings.iter().skip(i + 1) {
                assert!(!s.contains(other) && !other.contains(s), "{s} vs {other}");
            }
            total += s.num_addresses();
        }
        assert_eq!(total, base.num_addresses() - exclude.num_addresses());
    }

    #[test]
    fn test_split_single_level() {
        let base = Prefix::new("192.0.2.0/24").unwrap();
        let exclude = Prefix::new("192.0.2.128/25").unwrap();
        let siblings = base.split(&exclude).unwrap();
        assert_eq!(siblings, vec![Prefix::new("192.0.2.0/25").unwrap()]);
    }

    #[test]
    fn test_split_v6() {
        let base = Prefix::new("2000::/3").unwrap();
        let exclude = Prefix::new("2400::/12").unwrap();
        let siblings = base.split(&exclude).unwrap();
        assert_eq!(siblings.len(), 9);
        let total: u128 = siblings.iter().map(|s| s.num_addresses()).sum();
        assert_eq!(total, base.num_addresses() - exclude.num_addresses());
    }

    #[test]
    fn test_split_errors() {
        let base = Prefix::new("10.0.0.0/8").unwrap();
        // Equal target is not strictly contained.
        assert!(matches!(
            base.split(&base),
            Err(PrefixError::InvalidSplit(_))
        ));
        // Disjoint target.
        assert!(matches!(
            base.split(&Prefix::new("11.0.0.0/24").unwrap()),
            Err(PrefixError::InvalidSplit(_))
        ));
        // Family mismatch.
        assert!(matches!(
            base.split(&Prefix::new("2000::/16").unwrap()),
            Err(PrefixError::InvalidSplit(_))
        ));
    }

    #[test]
    fn test_num_addresses() {
        assert_eq!(Prefix::new("10.0.0.0/8").unwrap().num_addresses(), 1 << 24);
        assert_eq!(Prefix::new("0.0.0.0/0").unwrap().num_addresses(), 1 << 32);
        assert_eq!(
            Prefix::new("255.255.255.255/32").unwrap().num_addresses(),
            1
        );
        assert_eq!(Prefix::new("::/0").unwrap().num_addresses(), u128::MAX);
    }

    #[test]
    fn test_cmp() {
        let a = Prefix::new("10.0.0.0/8").unwrap();
        let b = Prefix::new("10.0.0.0/16").unwrap();
        let c = Prefix::new("11.0.0.0/8").unwrap();
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert_eq!(a, Prefix::new("10.0.0.0/8").unwrap());
    }

    #[test]
    fn test_serde_round_trip() {
        let p = Prefix::new("198.51.100.0/24").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#""198.51.100.0/24""#);
        let back: Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let bad: Result<Prefix, _> = serde_json::from_str(r#""198.51.100.1/24""#);
        assert!(bad.is_err());
    }
}
