use std::io::{BufWriter, Write};

use clap::{arg, Arg, ArgMatches, Command};

use crate::clap_enum_variants;
use crate::io::{load_store, write_summary_table, InputFormat};

pub fn get_subcommand() -> Command {
    Command::new("table")
        .about("Print the per-dataset measurements as a tab-separated table")
        .args(&[
            arg!(-i --input <FILE> "Measurements as CSV; the built-in sample run is used if omitted"),
            Arg::new("format")
                .help("Layout of the input file")
                .short('f')
                .long("format")
                .default_value("records")
                .ignore_case(true)
                .value_parser(clap_enum_variants!(InputFormat)),
        ])
}

pub fn execute<W: Write>(args: &ArgMatches, out: &mut BufWriter<W>) -> anyhow::Result<()> {
    let input = args.get_one::<String>("input").map(String::as_str);
    let format = args
        .get_one::<InputFormat>("format")
        .copied()
        .unwrap_or_default();
    let store = load_store(input, format, None)?;
    write_summary_table(&store, out)
}
