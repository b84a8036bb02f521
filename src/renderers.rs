pub mod algorithm_comparison;
pub mod operations;
pub mod scc_distribution;
pub mod time_vs_size;

use std::path::{Path, PathBuf};

use crate::chart::Figure;
use crate::driver::Renderer;
use crate::error::Result;
use crate::record::RecordStore;

pub use algorithm_comparison::AlgorithmComparison;
pub use operations::Operations;
pub use scc_distribution::SccDistribution;
pub use time_vs_size::TimeVsSize;

/// A renderer producing exactly one SVG figure from the record store.
pub trait Chart {
    const NAME: &'static str;
    const ARTIFACT: &'static str;

    fn figure(&self, store: &RecordStore) -> Result<Figure>;
}

impl<C: Chart> Renderer for C {
    fn name(&self) -> &str {
        C::NAME
    }

    fn artifact(&self) -> &str {
        C::ARTIFACT
    }

    fn render(&self, store: &RecordStore, out_dir: &Path) -> Result<PathBuf> {
        let figure = self.figure(store)?;
        let path = out_dir.join(C::ARTIFACT);
        figure.write_svg(&path)?;
        Ok(path)
    }
}

/// The four report charts in the order they are produced.
pub fn default_renderers() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(TimeVsSize),
        Box::new(AlgorithmComparison),
        Box::new(Operations),
        Box::new(SccDistribution),
    ]
}
