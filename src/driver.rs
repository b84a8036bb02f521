/* standard use */
use std::io::Write;
use std::path::{Path, PathBuf};

/* external crate */
use thiserror::Error;

/* private use */
use crate::error::ReportError;
use crate::record::RecordStore;

pub trait Renderer {
    fn name(&self) -> &str;
    /// file name of the artifact inside the output directory
    fn artifact(&self) -> &str;
    fn render(&self, store: &RecordStore, out_dir: &Path) -> Result<PathBuf, ReportError>;
}

#[derive(Error, Debug)]
#[error("renderer {position} ({renderer}) failed: {source}")]
pub struct RendererFailure {
    /// 1-based position in the run order
    pub position: usize,
    pub renderer: String,
    #[source]
    pub source: ReportError,
}

/// Runs `renderers` in the given order and stops at the first failure.
/// Writes one progress line before and one after every renderer to `progress`.
pub fn run_all<W: Write>(
    renderers: &[Box<dyn Renderer>],
    store: &RecordStore,
    out_dir: &Path,
    progress: &mut W,
) -> Result<Vec<PathBuf>, RendererFailure> {
    let mut artifacts = Vec::with_capacity(renderers.len());
    for (i, renderer) in renderers.iter().enumerate() {
        log::info!("executing renderer {}", renderer.name());
        // progress is best effort
        let _ = writeln!(progress, "Running {}...", renderer.name());
        match renderer.render(store, out_dir) {
            Ok(path) => {
                let _ = writeln!(progress, "Saved: {}", path.display());
                artifacts.push(path);
            }
            Err(source) => {
                log::error!("renderer {} failed: {}", renderer.name(), source);
                return Err(RendererFailure {
                    position: i + 1,
                    renderer: renderer.name().to_string(),
                    source,
                });
            }
        }
    }
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::small_store;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        name: String,
        fail: bool,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Renderer for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn artifact(&self) -> &str {
            "probe.svg"
        }

        fn render(&self, _store: &RecordStore, out_dir: &Path) -> Result<PathBuf, ReportError> {
            self.calls.borrow_mut().push(self.name.clone());
            if self.fail {
                Err(ReportError::render_failure(&self.name, "disk full"))
            } else {
                Ok(out_dir.join(format!("{}.svg", self.name)))
            }
        }
    }

    fn probes(failing: Option<usize>, calls: &Rc<RefCell<Vec<String>>>) -> Vec<Box<dyn Renderer>> {
        (1..=4)
            .map(|i| {
                Box::new(Probe {
                    name: format!("r{}", i),
                    fail: failing == Some(i),
                    calls: Rc::clone(calls),
                }) as Box<dyn Renderer>
            })
            .collect()
    }

    #[test]
    fn test_full_success_runs_each_renderer_once_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut progress = Vec::new();
        let artifacts = run_all(
            &probes(None, &calls),
            &small_store(),
            Path::new("out"),
            &mut progress,
        )
        .unwrap();
        assert_eq!(*calls.borrow(), vec!["r1", "r2", "r3", "r4"]);
        assert_eq!(artifacts.len(), 4);
        assert_eq!(artifacts[3], Path::new("out").join("r4.svg"));

        let progress = String::from_utf8(progress).unwrap();
        assert_eq!(progress.lines().count(), 8);
        assert!(progress.starts_with("Running r1..."));
    }

    #[test]
    fn test_fail_fast_on_second_renderer() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut progress = Vec::new();
        let failure = run_all(
            &probes(Some(2), &calls),
            &small_store(),
            Path::new("out"),
            &mut progress,
        )
        .unwrap_err();
        assert_eq!(*calls.borrow(), vec!["r1", "r2"]);
        assert_eq!(failure.position, 2);
        assert_eq!(failure.renderer, "r2");
        assert!(matches!(failure.source, ReportError::RenderFailure { .. }));
        assert!(failure.to_string().starts_with("renderer 2 (r2) failed"));
    }

    #[test]
    fn test_empty_run_succeeds() {
        let mut progress = Vec::new();
        let artifacts = run_all(&[], &small_store(), Path::new("."), &mut progress).unwrap();
        assert!(artifacts.is_empty());
        assert!(progress.is_empty());
    }
}
