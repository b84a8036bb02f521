/* standard use */
use std::path::Path;

/* external crate */
use itertools::{izip, Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

/* private use */
use crate::error::{ReportError, Result};

const MARKER_SIZE: i32 = 6;
const BAR_WIDTH: f64 = 0.6;

type DrawResult<T> = std::result::Result<T, DrawingAreaErrorKind<std::io::Error>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
}

#[derive(Debug, Clone)]
pub struct PointSeries {
    pub name: String,
    pub color: RGBColor,
    pub marker: Marker,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct BarSegment {
    pub name: String,
    pub color: RGBColor,
    pub heights: Vec<f64>,
    pub offsets: Vec<f64>,
}

#[derive(Debug, Clone)]
pub enum Plot {
    Scatter(Vec<PointSeries>),
    Bars {
        categories: Vec<String>,
        segments: Vec<BarSegment>,
        rotate_labels: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub plot: Plot,
}

/// A chart as plain data: one or more panels side by side under a common
/// title. Nothing is drawn until [`Figure::to_svg`].
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub panels: Vec<Panel>,
}

fn padded_domain<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    match values.minmax() {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v - v.abs().max(1.0) * 0.1, v + v.abs().max(1.0) * 0.1),
        MinMaxResult::MinMax(lo, hi) if hi - lo <= 0.0 => {
            (lo - lo.abs().max(1.0) * 0.1, hi + hi.abs().max(1.0) * 0.1)
        }
        MinMaxResult::MinMax(lo, hi) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}

/// Label of the bar at `x`; ticks between bars stay blank.
fn category_at(categories: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    categories.get(i as usize).cloned().unwrap_or_default()
}

impl Panel {
    fn draw(&self, area: &DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult<()> {
        match &self.plot {
            Plot::Scatter(series) => self.draw_scatter(area, series),
            Plot::Bars {
                categories,
                segments,
                rotate_labels,
            } => self.draw_bars(area, categories, segments, *rotate_labels),
        }
    }

    fn draw_scatter(
        &self,
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        series: &[PointSeries],
    ) -> DrawResult<()> {
        let (x_lo, x_hi) = padded_domain(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
        let (y_lo, y_hi) = padded_domain(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

        let mut builder = ChartBuilder::on(area);
        builder.margin(15).x_label_area_size(45).y_label_area_size(80);
        if !self.title.is_empty() {
            builder.caption(&self.title, ("sans-serif", 16));
        }
        let mut chart = builder.build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()?;

        for s in series {
            let style = s.color.mix(0.7).filled();
            let points = s.points.iter().copied();
            let m = MARKER_SIZE;
            match s.marker {
                Marker::Circle => chart
                    .draw_series(points.map(|p| Circle::new(p, m, style)))?
                    .label(s.name.as_str())
                    .legend(move |(x, y)| Circle::new((x, y), m, style)),
                Marker::Square => chart
                    .draw_series(points.map(|p| {
                        EmptyElement::at(p) + Rectangle::new([(-m, -m), (m, m)], style)
                    }))?
                    .label(s.name.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x - m, y - m), (x + m, y + m)], style)),
                Marker::TriangleUp => chart
                    .draw_series(points.map(|p| TriangleMarker::new(p, m, style)))?
                    .label(s.name.as_str())
                    .legend(move |(x, y)| TriangleMarker::new((x, y), m, style)),
                // pixel y grows downwards, the apex is at +m
                Marker::TriangleDown => chart
                    .draw_series(points.map(|p| {
                        EmptyElement::at(p) + Polygon::new(vec![(-m, -m), (m, -m), (0, m)], style)
                    }))?
                    .label(s.name.as_str())
                    .legend(move |(x, y)| {
                        Polygon::new(vec![(x - m, y - m), (x + m, y - m), (x, y + m)], style)
                    }),
            };
        }

        if series.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }
        Ok(())
    }

    fn draw_bars(
        &self,
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        categories: &[String],
        segments: &[BarSegment],
        rotate_labels: bool,
    ) -> DrawResult<()> {
        let top = segments
            .iter()
            .flat_map(|s| izip!(&s.heights, &s.offsets).map(|(h, o)| h + o))
            .fold(0.0, f64::max);
        let y_hi = if top > 0.0 { top * 1.05 } else { 1.0 };
        let x_hi = categories.len().max(1) as f64 - 0.5;

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(15)
            .x_label_area_size(if rotate_labels { 120 } else { 45 })
            .y_label_area_size(80);
        if !self.title.is_empty() {
            builder.caption(&self.title, ("sans-serif", 16));
        }
        let mut chart = builder.build_cartesian_2d(-0.5..x_hi, 0.0..y_hi)?;

        let label_font = ("sans-serif", 12).into_font();
        let label_font = if rotate_labels {
            label_font.transform(FontTransform::Rotate90)
        } else {
            label_font
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            // at least one tick per bar, in-between ticks get no label
            .x_labels(categories.len() * 2 + 1)
            .x_label_formatter(&|x| category_at(categories, *x))
            .x_label_style(label_font)
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()?;

        for s in segments {
            let style = s.color.mix(0.85).filled();
            chart
                .draw_series(izip!(&s.heights, &s.offsets).enumerate().map(|(i, (&h, &o))| {
                    let x = i as f64;
                    Rectangle::new([(x - BAR_WIDTH / 2.0, o), (x + BAR_WIDTH / 2.0, o + h)], style)
                }))?
                .label(s.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
        }

        if segments.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }
        Ok(())
    }
}

impl Figure {
    pub fn to_svg(&self) -> DrawResult<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE)?;
            let root = root.titled(&self.title, ("sans-serif", 22))?;
            let areas = root.split_evenly((1, self.panels.len().max(1)));
            for (panel, area) in self.panels.iter().zip(&areas) {
                panel.draw(area)?;
            }
            root.present()?;
        }
        Ok(svg)
    }

    /// Draws the figure and (over)writes it to `path`.
    pub fn write_svg(&self, path: &Path) -> Result<()> {
        let artifact = path.display().to_string();
        let svg = self
            .to_svg()
            .map_err(|e| ReportError::render_failure(&artifact, e))?;
        std::fs::write(path, svg).map_err(|e| ReportError::render_failure(&artifact, e))?;
        log::debug!("wrote {} panel(s) to {}", self.panels.len(), artifact);
        Ok(())
    }
}
