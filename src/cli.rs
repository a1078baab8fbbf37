//! Command-line flag surface.
//!
//! Everything the run needs is a flag; datasets and output files live in the
//! working directory.

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Parsed run options.
#[derive(Debug)]
pub struct Options {
    /// Extra CIDR ranges (either family) to exclude, on top of the lists.
    pub exclude: Vec<String>,
    /// Next hop for the emitted routes, usually the tunnel interface.
    pub next_hop: String,
    /// Which IPv4 exclusion lists to apply ("apnic", "ipip").
    pub ipv4_lists: Vec<String>,
    /// Country code the delegation feed is filtered to.
    pub country: String,
    /// Also write the IPv6 live set as a BIRD route file.
    pub ipv6_routes: bool,
    /// Optional JSON summary output file.
    pub json_summary: Option<String>,
    /// Print the final prefix trees to stdout.
    pub dump_tree: bool,
}

impl Options {
    pub fn use_apnic(&self) -> bool {
        self.ipv4_lists.iter().any(|l| l == "apnic")
    }

    pub fn use_ipip(&self) -> bool {
        self.ipv4_lists.iter().any(|l| l == "ipip")
    }
}

fn build_command() -> Command {
    Command::new("bypass-route-summary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate bypass routes covering everything outside one country's address space")
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("CIDR")
                .num_args(0..)
                .action(ArgAction::Append)
                .help("Extra ranges to exclude, in CIDR format (either address family)"),
        )
        .arg(
            Arg::new("next")
                .long("next")
                .value_name("INTERFACE OR IP")
                .default_value("g2/0")
                .help("Next hop for bypassed traffic, usually the tunnel interface"),
        )
        .arg(
            Arg::new("ipv4-list")
                .long("ipv4-list")
                .value_parser(["apnic", "ipip"])
                .num_args(0..)
                .default_values(["apnic", "ipip"])
                .help("IPv4 lists to subtract; multiple lists can be combined"),
        )
        .arg(
            Arg::new("country")
                .long("country")
                .value_name("CC")
                .default_value("CN")
                .help("Country code to filter the delegation feed by"),
        )
        .arg(
            Arg::new("ipv6-routes")
                .long("ipv6-routes")
                .action(ArgAction::SetTrue)
                .help("Also write the IPv6 live set as routes6.conf"),
        )
        .arg(
            Arg::new("json-summary")
                .long("json-summary")
                .value_name("FILE")
                .help("Write a machine-readable summary of the live sets"),
        )
        .arg(
            Arg::new("dump-tree")
                .long("dump-tree")
                .action(ArgAction::SetTrue)
                .help("Print the final prefix trees to stdout"),
        )
}

fn options_from_matches(matches: &ArgMatches) -> Options {
    Options {
        exclude: matches
            .get_many::<String>("exclude")
            .unwrap_or_default()
            .cloned()
            .collect(),
        next_hop: matches
            .get_one::<String>("next")
            .expect("has default")
            .clone(),
        ipv4_lists: matches
            .get_many::<String>("ipv4-list")
            .unwrap_or_default()
            .cloned()
            .collect(),
        country: matches
            .get_one::<String>("country")
            .expect("has default")
            .clone(),
        ipv6_routes: matches.get_flag("ipv6-routes"),
        json_summary: matches.get_one::<String>("json-summary").cloned(),
        dump_tree: matches.get_flag("dump-tree"),
    }
}

/// Parse the process arguments into [`Options`].
pub fn parse() -> Options {
    options_from_matches(&build_command().get_matches())
}
