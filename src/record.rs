/* standard use */
use std::collections::HashMap;
use std::fmt;

/* external crate */
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, EnumVariantNames};

/* private use */
use crate::align::check_aligned;
use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumVariantNames, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Algorithm {
    Scc,
    TopoSort,
    ShortestPath,
    LongestPath,
}

impl Algorithm {
    fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Scc => "SCC (Tarjan)",
            Algorithm::TopoSort => "Topo Sort (Kahn)",
            Algorithm::ShortestPath => "Shortest Path",
            Algorithm::LongestPath => "Longest Path",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Algorithm::Scc => "scc",
                Algorithm::TopoSort => "topo_sort",
                Algorithm::ShortestPath => "shortest_path",
                Algorithm::LongestPath => "longest_path",
            }
        )
    }
}

const ALGORITHM_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumVariantNames, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    VertexCount,
    EdgeCount,
    ElapsedTimeMs,
    OperationCount,
    SccCount,
}

impl fmt::Display for Field {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Field::VertexCount => "vertex_count",
                Field::EdgeCount => "edge_count",
                Field::ElapsedTimeMs => "elapsed_time_ms",
                Field::OperationCount => "operation_count",
                Field::SccCount => "scc_count",
            }
        )
    }
}

/// One observation of one algorithm on one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub dataset: String,
    pub algorithm: Algorithm,
    pub vertex_count: u64,
    pub edge_count: u64,
    pub elapsed_time_ms: f64,
    /// DFS visits for SCC, edge relaxations for the path algorithms
    pub operation_count: Option<u64>,
    pub scc_count: Option<u64>,
}

impl MeasurementRecord {
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::VertexCount => Some(self.vertex_count as f64),
            Field::EdgeCount => Some(self.edge_count as f64),
            Field::ElapsedTimeMs => Some(self.elapsed_time_ms),
            Field::OperationCount => self.operation_count.map(|x| x as f64),
            Field::SccCount => self.scc_count.map(|x| x as f64),
        }
    }
}

/// Read-only table of measurements of one report run.
///
/// Records are stored per dataset slot in canonical order, so every series
/// handed out is produced by walking that order; there is no other way to
/// obtain one.
#[derive(Debug, Clone)]
pub struct RecordStore {
    datasets: Vec<String>,
    rows: Vec<[Option<MeasurementRecord>; ALGORITHM_COUNT]>,
}

impl RecordStore {
    pub fn new(order: Vec<String>, records: Vec<MeasurementRecord>) -> Result<Self> {
        let mut position: HashMap<String, usize> = HashMap::with_capacity(order.len());
        for (i, dataset) in order.iter().enumerate() {
            if position.insert(dataset.clone(), i).is_some() {
                return Err(ReportError::DuplicateDataset(dataset.clone()));
            }
        }

        let mut rows: Vec<[Option<MeasurementRecord>; ALGORITHM_COUNT]> =
            (0..order.len()).map(|_| Default::default()).collect();
        for record in records {
            let i = *position
                .get(&record.dataset)
                .ok_or_else(|| ReportError::UnknownDataset(record.dataset.clone()))?;
            let slot = &mut rows[i][record.algorithm.index()];
            if slot.is_some() {
                return Err(ReportError::DuplicateRecord {
                    dataset: record.dataset,
                    algorithm: record.algorithm.to_string(),
                });
            }
            *slot = Some(record);
        }
        log::debug!(
            "record store holds {} datasets: {}",
            order.len(),
            order.join(", ")
        );

        Ok(Self {
            datasets: order,
            rows,
        })
    }

    /// Canonical order is the order in which datasets first appear.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Result<Self> {
        let mut order: Vec<String> = Vec::new();
        for record in &records {
            if !order.contains(&record.dataset) {
                order.push(record.dataset.clone());
            }
        }
        Self::new(order, records)
    }

    pub fn dataset_order(&self) -> &[String] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn record(&self, dataset: &str, algorithm: Algorithm) -> Option<&MeasurementRecord> {
        let i = self.datasets.iter().position(|d| d == dataset)?;
        self.rows[i][algorithm.index()].as_ref()
    }

    /// Look up a series by its textual key, e.g. `("scc", "elapsed_time_ms")`.
    pub fn get_series(&self, algorithm: &str, field: &str) -> Result<Vec<f64>> {
        let alg: Algorithm = algorithm
            .parse()
            .map_err(|_| ReportError::UnknownAlgorithm(algorithm.to_string()))?;
        let f: Field = field.parse().map_err(|_| ReportError::UnknownField {
            algorithm: algorithm.to_string(),
            field: field.to_string(),
        })?;
        self.series(alg, f)
    }

    pub fn series(&self, algorithm: Algorithm, field: Field) -> Result<Vec<f64>> {
        let present = self
            .rows
            .iter()
            .filter_map(|row| row[algorithm.index()].as_ref())
            .collect::<Vec<_>>();
        if present.is_empty() {
            return Err(ReportError::UnknownAlgorithm(algorithm.to_string()));
        }
        if present.iter().all(|r| r.get(field).is_none()) {
            return Err(ReportError::UnknownField {
                algorithm: algorithm.to_string(),
                field: field.to_string(),
            });
        }

        let series = present
            .iter()
            .filter_map(|r| r.get(field))
            .collect::<Vec<f64>>();
        check_aligned(&format!("{}/{}", algorithm, field), &series, self.len())?;
        Ok(series)
    }

    pub fn algorithms(&self) -> Vec<Algorithm> {
        Algorithm::iter()
            .filter(|a| self.rows.iter().any(|row| row[a.index()].is_some()))
            .collect()
    }
}
