//! Output rendering for the collected route sets.
//!
//! - [`comware`] - the mirrored route/unroute router scripts
//! - [`summary`] - terminal report and JSON dump

mod comware;
mod summary;

pub use comware::{write_bird_routes, write_route_scripts, STATIC_GATEWAY};
pub use summary::{print_summary, write_json_summary, RouteSummary};
