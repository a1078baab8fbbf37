//! Domain models for the route subtraction pass.
//!
//! This module contains the core data structures used throughout the
//! application:
//! - [`Prefix`] - IPv4/IPv6 network in canonical CIDR form
//! - [`PrefixNode`] - tree node owning a prefix and its partition
//! - [`Forest`] - the base address space of one family

mod forest;
mod node;
mod prefix;

// Re-export public types
pub use forest::Forest;
pub use node::PrefixNode;
pub use prefix::{Family, Prefix, PrefixError, MAX_LENGTH_V4, MAX_LENGTH_V6};
