use bypass_route_summary::{cli, compute_forests, output, processing, sources};
use log4rs;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let opts = cli::parse();
    let texts = sources::fetch_sources()
        .await
        .expect("Error fetching source datasets");

    let (forest4, forest6) = compute_forests(
        &texts,
        &opts.country,
        opts.use_apnic(),
        opts.use_ipip(),
        &opts.exclude,
    )
    .expect("Error subtracting exclusions");

    if opts.dump_tree {
        for line in forest4.dump() {
            println!("{line}");
        }
        for line in forest6.dump() {
            println!("{line}");
        }
    }

    let live4 = processing::collect(&forest4);
    let live6 = processing::collect(&forest6);

    output::write_route_scripts(&live4, &opts.next_hop, "routes4.py", "unroutes4.py")?;
    if opts.ipv6_routes {
        output::write_bird_routes(&live6, &opts.next_hop, "routes6.conf")?;
    }
    if let Some(file) = &opts.json_summary {
        output::write_json_summary(file, &live4, &live6, &opts.next_hop)?;
    }
    output::print_summary(&live4, &live6);

    Ok(())
}
