use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{arg, Arg, ArgAction, ArgMatches, Command};

use crate::clap_enum_variants;
use crate::driver::run_all;
use crate::html_report::{write_report, REPORT_FILE};
use crate::io::{load_store, InputFormat};
use crate::renderers::default_renderers;
use crate::report_config::ReportConfig;

pub const DEFAULT_OUTPUT_DIR: &str = "plots";

pub fn get_subcommand() -> Command {
    Command::new("render")
        .about("Render the benchmark charts as SVG files")
        .args(&[
            arg!(-i --input <FILE> "Measurements as CSV; the built-in sample run is used if omitted"),
            Arg::new("format")
                .help("Layout of the input file")
                .short('f')
                .long("format")
                .ignore_case(true)
                .value_parser(clap_enum_variants!(InputFormat)),
            arg!(-o --"output-dir" <DIR> "Directory the charts are written to (default: plots)"),
            arg!(-c --config <YAML> "Read settings from a YAML file; command line flags take precedence"),
            arg!(--html "Also write an html overview embedding all charts"),
            Arg::new("dry_run")
                .long("dry-run")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("Only show the planned charts, nothing is written"),
        ])
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub input: Option<String>,
    pub format: InputFormat,
    pub output_dir: PathBuf,
    pub html: bool,
    pub order: Option<Vec<String>>,
    pub dry_run: bool,
}

impl RenderSettings {
    pub fn from_args(args: &ArgMatches) -> anyhow::Result<Self> {
        let config = match args.get_one::<String>("config") {
            Some(path) => ReportConfig::from_yaml(path)?,
            None => ReportConfig::default(),
        };
        Ok(Self::merge(args, config))
    }

    fn merge(args: &ArgMatches, config: ReportConfig) -> Self {
        let input = args.get_one::<String>("input").cloned().or(config.input);
        let format = args
            .get_one::<InputFormat>("format")
            .copied()
            .or(config.format)
            .unwrap_or_default();
        let output_dir = args
            .get_one::<String>("output-dir")
            .cloned()
            .or(config.output_dir)
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
        Self {
            input,
            format,
            output_dir: PathBuf::from(output_dir),
            html: args.get_flag("html") || config.html,
            order: config.order,
            dry_run: args.get_flag("dry_run"),
        }
    }
}

pub fn execute<W: Write>(args: &ArgMatches, out: &mut BufWriter<W>) -> anyhow::Result<()> {
    let settings = RenderSettings::from_args(args)?;
    log::info!("{:?}", settings);

    let store = load_store(settings.input.as_deref(), settings.format, settings.order)?;
    let renderers = default_renderers();

    if settings.dry_run {
        writeln!(out, "# {} datasets: {}", store.len(), store.dataset_order().join(", "))?;
        for (i, renderer) in renderers.iter().enumerate() {
            writeln!(
                out,
                "{}\t{}\t{}",
                i + 1,
                renderer.name(),
                settings.output_dir.join(renderer.artifact()).display()
            )?;
        }
        if settings.html {
            writeln!(out, "-\thtml\t{}", settings.output_dir.join(REPORT_FILE).display())?;
        }
        return Ok(());
    }

    writeln!(out, "=== Generating Analysis Plots ===")?;
    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!("cannot create output directory {}", settings.output_dir.display())
    })?;

    let artifacts = match run_all(&renderers, &store, &settings.output_dir, out) {
        Ok(artifacts) => artifacts,
        Err(failure) => {
            writeln!(
                out,
                "Plot generation failed at renderer {} ({}): {}",
                failure.position, failure.renderer, failure.source
            )?;
            return Err(failure.into());
        }
    };
    if settings.html {
        let report = write_report(&artifacts, store.dataset_order(), &settings.output_dir)?;
        writeln!(out, "Saved: {}", report.display())?;
    }
    writeln!(out, "All plots generated successfully")?;
    writeln!(out, "Plots saved in {}", settings.output_dir.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(argv: &[&str]) -> ArgMatches {
        get_subcommand()
            .no_binary_name(true)
            .try_get_matches_from(argv)
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::merge(&matches(&[]), ReportConfig::default());
        assert_eq!(settings.input, None);
        assert_eq!(settings.format, InputFormat::Records);
        assert_eq!(settings.output_dir, PathBuf::from("plots"));
        assert!(!settings.html);
        assert!(!settings.dry_run);
    }

    #[test]
    fn test_command_line_overrides_config() {
        let config = ReportConfig {
            input: Some("from_config.csv".to_string()),
            format: Some(InputFormat::Summary),
            output_dir: Some("config_out".to_string()),
            html: true,
            order: Some(vec!["b".to_string(), "a".to_string()]),
        };
        let settings = RenderSettings::merge(
            &matches(&["-i", "cli.csv", "-o", "cli_out", "--format", "records"]),
            config,
        );
        assert_eq!(settings.input.as_deref(), Some("cli.csv"));
        assert_eq!(settings.format, InputFormat::Records);
        assert_eq!(settings.output_dir, PathBuf::from("cli_out"));
        assert!(settings.html);
        assert_eq!(settings.order, Some(vec!["b".to_string(), "a".to_string()]));
    }

    #[test]
    fn test_format_flag_ignores_case() {
        let settings = RenderSettings::merge(&matches(&["-f", "Summary"]), ReportConfig::default());
        assert_eq!(settings.format, InputFormat::Summary);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(get_subcommand()
            .no_binary_name(true)
            .try_get_matches_from(["-f", "json"])
            .is_err());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("plots");
        let args = matches(&["-o", target.to_str().unwrap(), "--dry-run", "--html"]);
        let mut out = BufWriter::new(Vec::new());
        execute(&args, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
        assert!(text.starts_with("# 9 datasets: tasks_large_1"));
        assert!(text.contains("4\tscc_distribution"));
        assert!(text.contains(REPORT_FILE));
        assert!(!target.exists());
    }
}
