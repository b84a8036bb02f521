//! Aggregation and chart reporting for graph algorithm benchmark runs.
//!
//! Measurements (one per dataset and algorithm) are collected in a
//! [`record::RecordStore`], which keeps every series aligned to one canonical
//! dataset order. The renderers in [`renderers`] turn the store into SVG
//! charts and [`driver::run_all`] runs them in order, stopping at the first
//! failure.

/* private use */
pub mod align;
pub mod chart;
mod commands;
pub mod derive;
pub mod driver;
pub mod error;
mod html_report;
pub mod io;
pub mod record;
pub mod renderers;
mod report_config;

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches, Command};

#[macro_export]
macro_rules! clap_enum_variants {
    // Credit: Johan Andersson (https://github.com/repi)
    // Code from https://github.com/clap-rs/clap/discussions/4264
    ($e: ty) => {{
        use clap::builder::TypedValueParser;
        use strum::VariantNames;
        clap::builder::PossibleValuesParser::new(<$e>::VARIANTS).map(|s| s.parse::<$e>().unwrap())
    }};
}

fn set_verbosity(args: &ArgMatches) {
    if args.get_flag("verbose") {
        Builder::new().filter_level(LevelFilter::Debug).init();
    } else {
        Builder::new().filter_level(LevelFilter::Info).init();
    }
}

pub fn run_cli() -> Result<(), anyhow::Error> {
    let mut out = std::io::BufWriter::new(std::io::stdout());

    let args = Command::new("algobench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Charts and tables for graph algorithm benchmark runs")
        .subcommand(commands::render::get_subcommand())
        .subcommand(commands::table::get_subcommand())
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Show debug log messages"),
        )
        .get_matches();

    set_verbosity(&args);

    let result = match args.subcommand() {
        Some(("render", sub)) => commands::render::execute(sub, &mut out),
        Some(("table", sub)) => commands::table::execute(sub, &mut out),
        _ => unreachable!("a subcommand is required"),
    };

    // clean up & close down
    out.flush()?;
    result
}
