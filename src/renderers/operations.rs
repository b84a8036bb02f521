use plotters::style::RGBColor;

use crate::align::check_aligned;
use crate::chart::{Figure, Marker, Panel, Plot, PointSeries};
use crate::derive::path_total;
use crate::error::Result;
use crate::record::{Algorithm, Field, RecordStore};

use super::Chart;

/// Work counters against edge count, one independent panel per counter.
pub struct Operations;

impl Operations {
    fn panel(
        title: &str,
        y_label: &str,
        color: RGBColor,
        edges: &[f64],
        counts: Vec<f64>,
    ) -> Panel {
        Panel {
            title: title.to_string(),
            x_label: "Number of Edges".to_string(),
            y_label: y_label.to_string(),
            plot: Plot::Scatter(vec![PointSeries {
                name: y_label.to_string(),
                color,
                marker: Marker::Circle,
                points: edges.iter().copied().zip(counts).collect(),
            }]),
        }
    }
}

impl Chart for Operations {
    const NAME: &'static str = "operations";
    const ARTIFACT: &'static str = "operations.svg";

    fn figure(&self, store: &RecordStore) -> Result<Figure> {
        let edges = store.series(Algorithm::Scc, Field::EdgeCount)?;
        let dfs_visits = store.series(Algorithm::Scc, Field::OperationCount)?;
        let relaxations = path_total(store, Field::OperationCount)?;
        check_aligned("dfs visits", &dfs_visits, edges.len())?;
        check_aligned("relaxations", &relaxations, edges.len())?;

        Ok(Figure {
            title: "Operation Counts vs Graph Size".to_string(),
            width: 1400,
            height: 500,
            panels: vec![
                Self::panel(
                    "SCC Algorithm: DFS Operations",
                    "DFS Visits",
                    RGBColor(0x2E, 0x86, 0xAB),
                    &edges,
                    dfs_visits,
                ),
                Self::panel(
                    "DAG SP/LP: Relaxation Operations",
                    "Edge Relaxations",
                    RGBColor(0xF1, 0x8F, 0x01),
                    &edges,
                    relaxations,
                ),
            ],
        })
    }
}
