//! Subtraction and collection passes over the prefix forest.
//!
//! - [`subtract`] - remove exclusion prefixes from a forest's frontier
//! - [`collect`] - walk the result into the final live block list
//! - [`reserved`] - the built-in special-use tables applied last

pub(crate) mod collect;
mod reserved;
pub(crate) mod subtract;

// Re-export public functions
pub use collect::{collect, collect_excluded, count_addresses};
pub use reserved::{reserved_ipv4, reserved_ipv6};
pub use subtract::subtract;
