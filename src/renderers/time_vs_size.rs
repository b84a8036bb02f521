use plotters::style::RGBColor;

use crate::align::check_aligned;
use crate::chart::{Figure, Marker, Panel, Plot, PointSeries};
use crate::error::Result;
use crate::record::{Algorithm, Field, RecordStore};

use super::Chart;

const SERIES: [(Algorithm, RGBColor, Marker); 4] = [
    (Algorithm::Scc, RGBColor(0x1f, 0x77, 0xb4), Marker::Circle),
    (Algorithm::TopoSort, RGBColor(0xff, 0x7f, 0x0e), Marker::Square),
    (Algorithm::ShortestPath, RGBColor(0x2c, 0xa0, 0x2c), Marker::TriangleUp),
    (Algorithm::LongestPath, RGBColor(0xd6, 0x27, 0x28), Marker::TriangleDown),
];

/// Elapsed time of every algorithm against the size of the input graph.
pub struct TimeVsSize;

impl Chart for TimeVsSize {
    const NAME: &'static str = "time_vs_size";
    const ARTIFACT: &'static str = "time_vs_size.svg";

    fn figure(&self, store: &RecordStore) -> Result<Figure> {
        let vertices = store.series(Algorithm::Scc, Field::VertexCount)?;
        let mut series = Vec::with_capacity(SERIES.len());
        for (algorithm, color, marker) in SERIES {
            let times = store.series(algorithm, Field::ElapsedTimeMs)?;
            check_aligned(&format!("{} time", algorithm), &times, vertices.len())?;
            series.push(PointSeries {
                name: algorithm.label().to_string(),
                color,
                marker,
                points: vertices.iter().copied().zip(times).collect(),
            });
        }

        Ok(Figure {
            title: "Algorithm Performance vs Graph Size".to_string(),
            width: 1000,
            height: 600,
            panels: vec![Panel {
                title: String::new(),
                x_label: "Number of Vertices".to_string(),
                y_label: "Execution Time (ms)".to_string(),
                plot: Plot::Scatter(series),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MeasurementRecord;
    use strum::IntoEnumIterator;

    #[test]
    fn test_points_share_vertex_counts() {
        let mut records = Vec::new();
        let datasets = [
            ("tasks_small_1", 6, 0.0136),
            ("tasks_small_2", 8, 0.0177),
            ("tasks_small_3", 10, 0.0174),
        ];
        for (dataset, vertices, scc_time) in datasets {
            for algorithm in Algorithm::iter() {
                records.push(MeasurementRecord {
                    dataset: dataset.to_string(),
                    algorithm,
                    vertex_count: vertices,
                    edge_count: vertices,
                    elapsed_time_ms: if algorithm == Algorithm::Scc {
                        scc_time
                    } else {
                        0.01
                    },
                    operation_count: None,
                    scc_count: None,
                });
            }
        }
        let store = RecordStore::from_records(records).unwrap();
        let figure = TimeVsSize.figure(&store).unwrap();

        let series = match &figure.panels[0].plot {
            Plot::Scatter(series) => series,
            _ => panic!("time vs size is a scatter plot"),
        };
        assert_eq!(series.len(), 4);
        for s in series {
            assert_eq!(s.points.len(), 3);
            let xs = s.points.iter().map(|p| p.0).collect::<Vec<_>>();
            assert_eq!(xs, vec![6.0, 8.0, 10.0]);
        }
        let scc = series.iter().find(|s| s.name == "SCC (Tarjan)").unwrap();
        assert_eq!(
            scc.points.iter().map(|p| p.1).collect::<Vec<_>>(),
            vec![0.0136, 0.0177, 0.0174]
        );
    }
}
