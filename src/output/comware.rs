//! Router script rendering.
//!
//! Consumes the collected live block list and renders the two mirrored
//! Comware scripts (`routes4.py` installs the static routes, `unroutes4.py`
//! removes them), plus an optional BIRD-style IPv6 route file.

use crate::models::Prefix;
use itertools::Itertools;
use std::error::Error;

/// Fixed static gateway every emitted route points at.
pub const STATIC_GATEWAY: &str = "192.168.100.230";

/// One `ip route-static` record; the CIDR's slash becomes a space.
fn route_line(prefix: &Prefix, next_hop: &str) -> String {
    format!(
        " ;ip route-static {} {} {} {}",
        prefix.addr, prefix.len, next_hop, STATIC_GATEWAY
    )
}

/// The mirror record removing the same route.
fn unroute_line(prefix: &Prefix, next_hop: &str) -> String {
    format!(
        " ;undo ip route-static {} {} {} {}",
        prefix.addr, prefix.len, next_hop, STATIC_GATEWAY
    )
}

/// Render a full Comware script: generation header, `system-view` wrapper,
/// one record per live block.
fn render_script<F>(prefixes: &[Prefix], line_fn: F) -> String
where
    F: Fn(&Prefix) -> String,
{
    let now = chrono::Utc::now()
        .with_timezone(&chrono_tz::Asia::Shanghai)
        .format("%Y-%m-%d %H:%M:%S");
    let mut script = String::new();
    script.push_str(&format!("# Auto-generated on: {now}\n"));
    script.push_str("import comware\n");
    script.push_str("comware.CLI('system-view");
    for prefix in prefixes {
        script.push_str(&line_fn(prefix));
    }
    script.push_str("')");
    script
}

/// Write the mirrored route/unroute scripts for the IPv4 live set.
pub fn write_route_scripts(
    prefixes: &[Prefix],
    next_hop: &str,
    routes_file: &str,
    unroutes_file: &str,
) -> Result<(), Box<dyn Error>> {
    let routes = render_script(prefixes, |p| route_line(p, next_hop));
    std::fs::write(routes_file, routes)
        .map_err(|e| format!("Error writing {routes_file}: {e}"))?;

    let unroutes = render_script(prefixes, |p| unroute_line(p, next_hop));
    std::fs::write(unroutes_file, unroutes)
        .map_err(|e| format!("Error writing {unroutes_file}: {e}"))?;

    log::info!(
        "wrote {} route records to {routes_file} / {unroutes_file}",
        prefixes.len()
    );
    Ok(())
}

/// Write the IPv6 live set as a BIRD static-route stanza.
pub fn write_bird_routes(
    prefixes: &[Prefix],
    next_hop: &str,
    file: &str,
) -> Result<(), Box<dyn Error>> {
    let body = prefixes
        .iter()
        .map(|p| format!("route {p} via \"{next_hop}\";"))
        .join("\n");
    std::fs::write(file, format!("{body}\n")).map_err(|e| format!("Error writing {file}: {e}"))?;
    log::info!("wrote {} ipv6 route records to {file}", prefixes.len());
    Ok(())
}
