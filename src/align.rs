use crate::error::{ReportError, Result};

pub fn check_aligned(name: &str, series: &[f64], expected: usize) -> Result<()> {
    if series.len() != expected {
        return Err(ReportError::MisalignedSeries {
            name: name.to_string(),
            expected,
            actual: series.len(),
        });
    }
    Ok(())
}

/// Base offsets of stacked segments: the first segment sits on zero, every
/// following one on the running sum of all segments below it.
pub fn stack_offsets(segments: &[(&str, &[f64])], expected: usize) -> Result<Vec<Vec<f64>>> {
    for (name, values) in segments {
        check_aligned(name, values, expected)?;
    }

    let mut offsets = Vec::with_capacity(segments.len());
    let mut running = vec![0.0; expected];
    for (_, values) in segments {
        offsets.push(running.clone());
        for (acc, v) in running.iter_mut().zip(values.iter()) {
            *acc += v;
        }
    }
    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_offsets_are_cumulative() {
        let scc = [1.0, 2.0];
        let topo = [3.0, 4.0];
        let sp = [5.0, 6.0];
        let offsets =
            stack_offsets(&[("scc", &scc[..]), ("topo", &topo[..]), ("sp", &sp[..])], 2).unwrap();
        assert_eq!(offsets[0], vec![0.0, 0.0]);
        assert_eq!(offsets[1], vec![1.0, 2.0]);
        assert_eq!(offsets[2], vec![4.0, 6.0]);
    }

    #[test]
    fn test_stack_offsets_for_varying_lengths() {
        for n in 0..20usize {
            let a = (0..n).map(|i| i as f64).collect::<Vec<_>>();
            let b = (0..n).map(|i| (i * i) as f64 / 4.0).collect::<Vec<_>>();
            let c = vec![0.5; n];
            let offsets = stack_offsets(&[("a", &a[..]), ("b", &b[..]), ("c", &c[..])], n).unwrap();
            for i in 0..n {
                assert_eq!(offsets[1][i], a[i]);
                assert_eq!(offsets[2][i], a[i] + b[i]);
            }
        }
    }

    #[test]
    fn test_stack_offsets_reject_short_segment() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];
        assert!(matches!(
            stack_offsets(&[("a", &a[..]), ("b", &b[..])], 3),
            Err(ReportError::MisalignedSeries { actual: 2, .. })
        ));
    }

    #[test]
    fn test_check_aligned() {
        assert!(check_aligned("x", &[1.0, 2.0], 2).is_ok());
        assert!(check_aligned("x", &[], 1).is_err());
    }
}
