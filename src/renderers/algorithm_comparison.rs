use plotters::style::RGBColor;

use crate::align::stack_offsets;
use crate::chart::{BarSegment, Figure, Panel, Plot};
use crate::derive::path_total;
use crate::error::Result;
use crate::record::{Algorithm, Field, RecordStore};

use super::Chart;

/// Stacked execution time per dataset: SCC at the base, then topological
/// sort, then shortest and longest path combined.
pub struct AlgorithmComparison;

impl Chart for AlgorithmComparison {
    const NAME: &'static str = "algorithm_comparison";
    const ARTIFACT: &'static str = "algorithm_comparison.svg";

    fn figure(&self, store: &RecordStore) -> Result<Figure> {
        let scc_time = store.series(Algorithm::Scc, Field::ElapsedTimeMs)?;
        let topo_time = store.series(Algorithm::TopoSort, Field::ElapsedTimeMs)?;
        let sp_time = path_total(store, Field::ElapsedTimeMs)?;

        let stack = [
            ("SCC", RGBColor(0x2E, 0x86, 0xAB), scc_time),
            ("Topo Sort", RGBColor(0xA2, 0x3B, 0x72), topo_time),
            ("DAG SP/LP", RGBColor(0xF1, 0x8F, 0x01), sp_time),
        ];
        let offsets = stack_offsets(
            &stack
                .iter()
                .map(|(name, _, values)| (*name, &values[..]))
                .collect::<Vec<_>>(),
            store.len(),
        )?;
        let segments = stack
            .into_iter()
            .zip(offsets)
            .map(|((name, color, heights), offsets)| BarSegment {
                name: name.to_string(),
                color,
                heights,
                offsets,
            })
            .collect();

        Ok(Figure {
            title: "Algorithm Execution Time Breakdown by Dataset".to_string(),
            width: 1200,
            height: 600,
            panels: vec![Panel {
                title: String::new(),
                x_label: String::new(),
                y_label: "Time (ms)".to_string(),
                plot: Plot::Bars {
                    categories: store.dataset_order().to_vec(),
                    segments,
                    rotate_labels: true,
                },
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MeasurementRecord;

    fn timed(dataset: &str, algorithm: Algorithm, time: f64) -> MeasurementRecord {
        MeasurementRecord {
            dataset: dataset.to_string(),
            algorithm,
            vertex_count: 4,
            edge_count: 4,
            elapsed_time_ms: time,
            operation_count: None,
            scc_count: None,
        }
    }

    #[test]
    fn test_segments_stack_on_cumulative_offsets() {
        let store = RecordStore::from_records(vec![
            timed("x", Algorithm::Scc, 1.0),
            timed("y", Algorithm::Scc, 2.0),
            timed("x", Algorithm::TopoSort, 3.0),
            timed("y", Algorithm::TopoSort, 4.0),
            timed("x", Algorithm::ShortestPath, 2.0),
            timed("y", Algorithm::ShortestPath, 2.5),
            timed("x", Algorithm::LongestPath, 3.0),
            timed("y", Algorithm::LongestPath, 3.5),
        ])
        .unwrap();
        let figure = AlgorithmComparison.figure(&store).unwrap();
        match &figure.panels[0].plot {
            Plot::Bars {
                categories,
                segments,
                ..
            } => {
                assert_eq!(categories, &vec!["x".to_string(), "y".to_string()]);
                assert_eq!(segments[0].name, "SCC");
                assert_eq!(segments[0].offsets, vec![0.0, 0.0]);
                assert_eq!(segments[1].offsets, vec![1.0, 2.0]);
                assert_eq!(segments[2].heights, vec![5.0, 6.0]);
                assert_eq!(segments[2].offsets, vec![4.0, 6.0]);
            }
            _ => panic!("algorithm comparison is a bar chart"),
        }
    }
}
