//! Source dataset retrieval and parsing.
//!
//! This is the boundary layer around the core: it downloads (or reads
//! cached) datasets and turns their text formats into [`Prefix`] lists.
//! Parse failures surface here, never inside the subtraction core.
//!
//! - [`fetch`] - download-or-cache of the raw dataset files
//! - [`registry`] - IANA top-level allocation CSV
//! - [`delegated`] - RIR delegation feed for one country
//! - [`national_list`] - flat CIDR-per-line supplementary list
//!
//! [`Prefix`]: crate::models::Prefix

mod delegated;
mod fetch;
mod national_list;
mod registry;

// Re-export public types and functions
pub use delegated::{parse_delegated, Delegations};
pub use fetch::{fetch_sources, SourceTexts, DELEGATED_URL, NATIONAL_LIST_URL, REGISTRY_URL};
pub use national_list::parse_national_list;
pub use registry::parse_registry_csv;
