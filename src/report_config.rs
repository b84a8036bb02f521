use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use serde::Deserialize;

use crate::io::InputFormat;

/// Settings of a `render` run read from a YAML file. Every field can be
/// overridden on the command line.
///
/// ```yaml
/// input: results/summary.csv
/// format: summary
/// output_dir: plots
/// html: true
/// order: [tasks_small_1, tasks_medium_1, tasks_large_1]
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub input: Option<String>,
    pub format: Option<InputFormat>,
    pub output_dir: Option<String>,
    #[serde(default)]
    pub html: bool,
    /// canonical dataset order, defaults to the order of the input
    pub order: Option<Vec<String>>,
}

impl ReportConfig {
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let f = File::open(path).with_context(|| format!("cannot open config file {}", path))?;
        let reader = BufReader::new(f);
        let config = serde_yaml::from_reader(reader)
            .with_context(|| format!("cannot parse config file {}", path))?;
        log::debug!("config: {:?}", config);
        Ok(config)
    }
}
