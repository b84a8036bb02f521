use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::from_utf8;

use base64::{engine::general_purpose, Engine};
use handlebars::{to_json, Handlebars, RenderError};
use serde_json::json;
use time::{macros::format_description, OffsetDateTime};

use crate::error::{ReportError, Result};

pub const REPORT_HBS: &[u8] = include_bytes!("../hbs/report.hbs");
pub const REPORT_FILE: &str = "report.html";

pub fn to_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// One chart of the overview page, the SVG already base64 encoded.
pub struct ReportSection {
    pub name: String,
    pub svg: String,
}

impl ReportSection {
    pub fn from_svg(name: &str, svg: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            svg: general_purpose::STANDARD.encode(svg),
        }
    }
}

fn version() -> String {
    option_env!("GIT_HASH")
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .unwrap_or(env!("CARGO_PKG_VERSION"))
        .to_string()
}

pub fn generate_report(
    sections: Vec<ReportSection>,
    datasets: &[String],
    registry: &mut Handlebars,
) -> std::result::Result<String, RenderError> {
    if !registry.has_template("report") {
        registry.register_template_string(
            "report",
            from_utf8(REPORT_HBS).expect("report template is valid utf-8"),
        )?;
    }

    let sections = sections
        .into_iter()
        .map(|s| json!({ "id": to_id(&s.name), "name": s.name, "svg": s.svg }))
        .collect::<Vec<_>>();
    let timestamp = OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))
        .unwrap_or_default();
    let vars = HashMap::from([
        ("title", to_json("Graph Algorithm Benchmark Report")),
        ("dataset_count", to_json(datasets.len())),
        ("datasets", to_json(datasets.join(", "))),
        ("sections", to_json(sections)),
        ("version", to_json(version())),
        ("timestamp", to_json(timestamp)),
    ]);
    registry.render("report", &vars)
}

/// Embeds the given chart files into `report.html` next to them.
pub fn write_report(artifacts: &[PathBuf], datasets: &[String], out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(REPORT_FILE);
    let artifact = path.display().to_string();

    let mut sections = Vec::with_capacity(artifacts.len());
    for chart in artifacts {
        let svg = std::fs::read(chart).map_err(|e| ReportError::render_failure(&artifact, e))?;
        let name = chart
            .file_stem()
            .map(|s| s.to_string_lossy().replace('_', " "))
            .unwrap_or_default();
        sections.push(ReportSection::from_svg(&name, &svg));
    }

    let mut registry = Handlebars::new();
    let html = generate_report(sections, datasets, &mut registry)
        .map_err(|e| ReportError::render_failure(&artifact, e))?;
    std::fs::write(&path, html).map_err(|e| ReportError::render_failure(&artifact, e))?;
    log::info!("wrote html report to {}", artifact);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("time vs size"), "time-vs-size");
        assert_eq!(to_id("SCC (Tarjan)"), "scc--tarjan-");
    }

    #[test]
    fn test_report_embeds_sections() {
        let mut registry = Handlebars::new();
        let html = generate_report(
            vec![ReportSection::from_svg("operations", b"<svg></svg>")],
            &["a".to_string(), "b".to_string()],
            &mut registry,
        )
        .unwrap();
        assert!(html.contains("<section id=\"operations\">"));
        assert!(html.contains(&general_purpose::STANDARD.encode(b"<svg></svg>")));
        assert!(html.contains("2 datasets: a, b"));
    }

    #[test]
    fn test_missing_chart_is_render_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_report(
            &[dir.path().join("time_vs_size.svg")],
            &[],
            dir.path(),
        )
        .unwrap_err();
        assert!(!err.is_data_error());
    }
}
