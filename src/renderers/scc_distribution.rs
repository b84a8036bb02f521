use std::collections::HashMap;

use plotters::style::RGBColor;

use crate::chart::{BarSegment, Figure, Panel, Plot};
use crate::derive::Derivation;
use crate::error::Result;
use crate::record::{Algorithm, Field, RecordStore};

use super::Chart;

pub struct SccDistribution;

impl SccDistribution {
    fn panel(
        title: &str,
        y_label: &str,
        color: RGBColor,
        values: Vec<f64>,
        datasets: &[String],
    ) -> Panel {
        Panel {
            title: title.to_string(),
            x_label: "Dataset".to_string(),
            y_label: y_label.to_string(),
            plot: Plot::Bars {
                categories: datasets.to_vec(),
                segments: vec![BarSegment {
                    name: y_label.to_string(),
                    color,
                    offsets: vec![0.0; values.len()],
                    heights: values,
                }],
                rotate_labels: true,
            },
        }
    }
}

impl Chart for SccDistribution {
    const NAME: &'static str = "scc_distribution";
    const ARTIFACT: &'static str = "scc_distribution.svg";

    fn figure(&self, store: &RecordStore) -> Result<Figure> {
        let counts = store.series(Algorithm::Scc, Field::SccCount)?;
        let vertices = store.series(Algorithm::Scc, Field::VertexCount)?;
        let datasets = store.dataset_order();

        for record in datasets.iter().filter_map(|d| store.record(d, Algorithm::Scc)) {
            if record.scc_count == Some(0) && record.vertex_count > 0 {
                log::warn!(
                    "dataset {} has {} vertices but no SCCs, plotting an average SCC size of 0",
                    record.dataset,
                    record.vertex_count
                );
            }
        }
        let average = Derivation::AverageComponentSize.compute(&HashMap::from([
            ("vertices", &vertices[..]),
            ("components", &counts[..]),
        ]))?;

        Ok(Figure {
            title: "SCC Distribution".to_string(),
            width: 1400,
            height: 560,
            panels: vec![
                Self::panel(
                    "SCC Count by Dataset",
                    "Number of SCCs",
                    RGBColor(0xA2, 0x3B, 0x72),
                    counts,
                    datasets,
                ),
                Self::panel(
                    "Average SCC Size by Dataset",
                    "Average SCC Size",
                    RGBColor(0x2E, 0x86, 0xAB),
                    average,
                    datasets,
                ),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MeasurementRecord;

    fn scc(dataset: &str, vertices: u64, sccs: u64) -> MeasurementRecord {
        MeasurementRecord {
            dataset: dataset.to_string(),
            algorithm: Algorithm::Scc,
            vertex_count: vertices,
            edge_count: vertices,
            elapsed_time_ms: 0.02,
            operation_count: Some(vertices),
            scc_count: Some(sccs),
        }
    }

    fn heights(panel: &Panel) -> (Vec<String>, Vec<f64>) {
        match &panel.plot {
            Plot::Bars {
                categories,
                segments,
                rotate_labels,
            } => {
                assert!(*rotate_labels);
                (categories.clone(), segments[0].heights.clone())
            }
            _ => panic!("scc distribution panels are bar charts"),
        }
    }

    #[test]
    fn test_counts_and_average_size() {
        let store = RecordStore::from_records(vec![
            scc("tasks_large_1", 25, 5),
            scc("tasks_large_3", 50, 50),
            scc("empty", 0, 0),
        ])
        .unwrap();
        let figure = SccDistribution.figure(&store).unwrap();

        let (categories, counts) = heights(&figure.panels[0]);
        assert_eq!(categories, vec!["tasks_large_1", "tasks_large_3", "empty"]);
        assert_eq!(counts, vec![5.0, 50.0, 0.0]);

        let (_, average) = heights(&figure.panels[1]);
        assert_eq!(average, vec![5.0, 1.0, 0.0]);
    }

    #[test]
    fn test_zero_components_do_not_fail() {
        let store = RecordStore::from_records(vec![scc("odd", 10, 0)]).unwrap();
        let figure = SccDistribution.figure(&store).unwrap();
        let (_, average) = heights(&figure.panels[1]);
        assert_eq!(average, vec![0.0]);
    }
}
