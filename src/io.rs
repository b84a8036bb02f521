/* standard use */
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::str::{self, FromStr};

/* external crate */
use anyhow::Context;
use quick_csv::Csv;
use serde::Deserialize;
use strum_macros::{EnumString, EnumVariantNames};

/* private use */
use crate::derive::path_total;
use crate::error::{ReportError, Result};
use crate::record::{Algorithm, Field, MeasurementRecord, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Default, EnumString, EnumVariantNames, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// one row per (dataset, algorithm)
    #[default]
    Records,
    /// one row per dataset, as written by the benchmark runner
    Summary,
}

/// One line of the benchmark runner's `summary.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub dataset: String,
    pub vertices: u64,
    pub edges: u64,
    pub num_sccs: u64,
    pub scc_time: f64,
    pub topo_time: f64,
    pub shortest_time: f64,
    pub longest_time: f64,
    pub dfs_visits: u64,
    pub relaxations: u64,
}

impl SummaryRow {
    /// Splits the row into one record per algorithm. The summary only knows
    /// the combined relaxation count of both path algorithms; it goes to the
    /// shortest path record and the longest path record gets 0, so the
    /// per-dataset path total stays the same.
    pub fn into_records(self) -> Vec<MeasurementRecord> {
        let base = |algorithm, elapsed_time_ms, operation_count, scc_count| MeasurementRecord {
            dataset: self.dataset.clone(),
            algorithm,
            vertex_count: self.vertices,
            edge_count: self.edges,
            elapsed_time_ms,
            operation_count,
            scc_count,
        };
        vec![
            base(
                Algorithm::Scc,
                self.scc_time,
                Some(self.dfs_visits),
                Some(self.num_sccs),
            ),
            base(Algorithm::TopoSort, self.topo_time, None, None),
            base(
                Algorithm::ShortestPath,
                self.shortest_time,
                Some(self.relaxations),
                None,
            ),
            base(Algorithm::LongestPath, self.longest_time, Some(0), None),
        ]
    }
}

/// Column lookup by (case-insensitive) header name.
struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    fn new(fields: &[String]) -> Self {
        Self {
            columns: fields
                .iter()
                .enumerate()
                .map(|(i, f)| (f.to_lowercase(), i))
                .collect(),
        }
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.columns.get(&name.to_lowercase()).copied()
    }

    fn require(&self, names: &[&str]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.optional(name).ok_or_else(|| ReportError::MalformedInput {
                    line: 1,
                    reason: format!("missing column {}", name),
                })
            })
            .collect()
    }
}

struct Line<'a> {
    number: usize,
    fields: &'a [String],
}

impl<'a> Line<'a> {
    fn malformed(&self, reason: String) -> ReportError {
        ReportError::MalformedInput {
            line: self.number,
            reason,
        }
    }

    fn text(&self, col: usize) -> Result<&'a str> {
        self.fields
            .get(col)
            .map(|s| s.as_str())
            .ok_or_else(|| self.malformed(format!("expected at least {} columns", col + 1)))
    }

    fn count(&self, col: usize, name: &str) -> Result<u64> {
        let text = self.text(col)?;
        u64::from_str(text).map_err(|_| {
            self.malformed(format!(
                "{} must be a non-negative integer, got '{}'",
                name, text
            ))
        })
    }

    fn optional_count(&self, col: usize, name: &str) -> Result<Option<u64>> {
        match self.fields.get(col) {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(_) => self.count(col, name).map(Some),
        }
    }

    fn time(&self, col: usize, name: &str) -> Result<f64> {
        let text = self.text(col)?;
        match f64::from_str(text) {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(self.malformed(format!(
                "{} must be a non-negative number, got '{}'",
                name, text
            ))),
        }
    }
}

/// Reads all rows, trimmed, skipping blank ones. Returns (line number, fields).
fn read_rows<R: Read>(data: &mut BufReader<R>) -> Result<Vec<(usize, Vec<String>)>> {
    let reader = Csv::from_reader(data)
        .delimiter(b',')
        .flexible(true)
        .has_header(false);

    let mut rows = Vec::new();
    for (i, row) in reader.enumerate() {
        let row = row.map_err(|e| ReportError::MalformedInput {
            line: i + 1,
            reason: e.to_string(),
        })?;
        let mut fields = Vec::new();
        for col in row.bytes_columns() {
            let text = str::from_utf8(col).map_err(|e| ReportError::MalformedInput {
                line: i + 1,
                reason: e.to_string(),
            })?;
            fields.push(text.trim().trim_matches('"').to_string());
        }
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push((i + 1, fields));
    }
    if rows.len() < 2 {
        return Err(ReportError::MalformedInput {
            line: rows.len(),
            reason: "input needs a header and at least one record".to_string(),
        });
    }
    Ok(rows)
}

pub fn parse_records<R: Read>(data: &mut BufReader<R>) -> Result<Vec<MeasurementRecord>> {
    let rows = read_rows(data)?;
    let header = Header::new(&rows[0].1);
    let cols = header.require(&[
        "dataset",
        "algorithm",
        "vertex_count",
        "edge_count",
        "elapsed_time_ms",
    ])?;
    let operation_col = header.optional("operation_count");
    let scc_col = header.optional("scc_count");

    let mut res = Vec::with_capacity(rows.len() - 1);
    for (number, fields) in &rows[1..] {
        let line = Line {
            number: *number,
            fields,
        };
        let algorithm_name = line.text(cols[1])?;
        let algorithm = Algorithm::from_str(algorithm_name)
            .map_err(|_| line.malformed(format!("unknown algorithm '{}'", algorithm_name)))?;
        let operation_count = match operation_col {
            Some(col) => line.optional_count(col, "operation_count")?,
            None => None,
        };
        let scc_count = match scc_col {
            Some(col) => line.optional_count(col, "scc_count")?,
            None => None,
        };
        res.push(MeasurementRecord {
            dataset: line.text(cols[0])?.to_string(),
            algorithm,
            vertex_count: line.count(cols[2], "vertex_count")?,
            edge_count: line.count(cols[3], "edge_count")?,
            elapsed_time_ms: line.time(cols[4], "elapsed_time_ms")?,
            operation_count,
            scc_count,
        });
    }
    log::info!("read {} measurement records", res.len());
    Ok(res)
}

pub fn parse_summary<R: Read>(data: &mut BufReader<R>) -> Result<Vec<SummaryRow>> {
    let rows = read_rows(data)?;
    let cols = Header::new(&rows[0].1).require(&[
        "Dataset",
        "Vertices",
        "Edges",
        "Num_SCCs",
        "SCC_Time_ms",
        "Topo_Time_ms",
        "Shortest_Time_ms",
        "Longest_Time_ms",
        "DFS_Visits",
        "Relaxations",
    ])?;

    let mut res = Vec::with_capacity(rows.len() - 1);
    for (number, fields) in &rows[1..] {
        let line = Line {
            number: *number,
            fields,
        };
        res.push(SummaryRow {
            dataset: line.text(cols[0])?.to_string(),
            vertices: line.count(cols[1], "Vertices")?,
            edges: line.count(cols[2], "Edges")?,
            num_sccs: line.count(cols[3], "Num_SCCs")?,
            scc_time: line.time(cols[4], "SCC_Time_ms")?,
            topo_time: line.time(cols[5], "Topo_Time_ms")?,
            shortest_time: line.time(cols[6], "Shortest_Time_ms")?,
            longest_time: line.time(cols[7], "Longest_Time_ms")?,
            dfs_visits: line.count(cols[8], "DFS_Visits")?,
            relaxations: line.count(cols[9], "Relaxations")?,
        });
    }
    log::info!("read {} summary rows", res.len());
    Ok(res)
}

/// Measurements of the nine `tasks_*` datasets shipped with the benchmark.
pub fn sample_summary() -> Vec<SummaryRow> {
    #[rustfmt::skip]
    let rows: [(&str, u64, u64, u64, f64, f64, f64, f64, u64, u64); 9] = [
        ("tasks_large_1", 25, 50, 5, 0.223459, 0.05325, 0.020708, 0.017417, 25, 8),
        ("tasks_large_2", 35, 120, 5, 0.141833, 0.01675, 0.007917, 0.011959, 35, 8),
        ("tasks_large_3", 50, 150, 50, 0.184167, 0.133834, 0.009917, 0.064583, 50, 164),
        ("tasks_medium_1", 12, 20, 7, 0.023875, 0.019375, 0.00525, 0.00625, 12, 18),
        ("tasks_medium_2", 15, 35, 5, 0.031042, 0.0075, 0.004042, 0.004, 15, 12),
        ("tasks_medium_3", 18, 45, 18, 0.038167, 0.024292, 0.004375, 0.02025, 18, 49),
        ("tasks_small_1", 6, 8, 6, 0.013625, 0.009583, 0.004792, 0.006, 6, 16),
        ("tasks_small_2", 8, 12, 8, 0.017666, 0.010375, 0.002041, 0.005959, 8, 13),
        ("tasks_small_3", 10, 25, 10, 0.017417, 0.011875, 0.005709, 0.0135, 10, 38),
    ];
    rows.iter()
        .map(|r| SummaryRow {
            dataset: r.0.to_string(),
            vertices: r.1,
            edges: r.2,
            num_sccs: r.3,
            scc_time: r.4,
            topo_time: r.5,
            shortest_time: r.6,
            longest_time: r.7,
            dfs_visits: r.8,
            relaxations: r.9,
        })
        .collect()
}

pub fn read_measurements(
    input: Option<&str>,
    format: InputFormat,
) -> anyhow::Result<Vec<MeasurementRecord>> {
    let records = match input {
        None => {
            log::info!("no input given, using the built-in sample run");
            sample_summary()
                .into_iter()
                .flat_map(SummaryRow::into_records)
                .collect()
        }
        Some(path) => {
            let f = File::open(path).with_context(|| format!("cannot open input file {}", path))?;
            let mut data = BufReader::new(f);
            let parsed = match format {
                InputFormat::Records => parse_records(&mut data),
                InputFormat::Summary => parse_summary(&mut data)
                    .map(|rows| rows.into_iter().flat_map(SummaryRow::into_records).collect()),
            };
            parsed.with_context(|| format!("cannot read measurements from {}", path))?
        }
    };
    Ok(records)
}

pub fn load_store(
    input: Option<&str>,
    format: InputFormat,
    order: Option<Vec<String>>,
) -> anyhow::Result<RecordStore> {
    let records = read_measurements(input, format)?;
    let store = match order {
        Some(order) => RecordStore::new(order, records)?,
        None => RecordStore::from_records(records)?,
    };
    Ok(store)
}

/// Tab-separated per-dataset overview, one line per dataset in canonical order.
pub fn write_summary_table<W: Write>(
    store: &RecordStore,
    out: &mut BufWriter<W>,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "# {}",
        std::env::args().collect::<Vec<String>>().join(" ")
    )?;
    let header = [
        "dataset",
        "vertices",
        "edges",
        "sccs",
        "scc_ms",
        "topo_ms",
        "shortest_ms",
        "longest_ms",
        "dfs_visits",
        "relaxations",
    ];
    writeln!(out, "{}", header.join("\t"))?;

    let columns = vec![
        store.series(Algorithm::Scc, Field::VertexCount)?,
        store.series(Algorithm::Scc, Field::EdgeCount)?,
        store.series(Algorithm::Scc, Field::SccCount)?,
        store.series(Algorithm::Scc, Field::ElapsedTimeMs)?,
        store.series(Algorithm::TopoSort, Field::ElapsedTimeMs)?,
        store.series(Algorithm::ShortestPath, Field::ElapsedTimeMs)?,
        store.series(Algorithm::LongestPath, Field::ElapsedTimeMs)?,
        store.series(Algorithm::Scc, Field::OperationCount)?,
        path_total(store, Field::OperationCount)?,
    ];
    for (i, dataset) in store.dataset_order().iter().enumerate() {
        write!(out, "{}", dataset)?;
        for column in &columns {
            write!(out, "\t{}", column[i])?;
        }
        writeln!(out)?;
    }
    Ok(())
}
