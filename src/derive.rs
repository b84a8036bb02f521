/* standard use */
use std::collections::HashMap;

/* external crate */
use strum_macros::{EnumString, EnumVariantNames};

/* private use */
use crate::error::{ReportError, Result};
use crate::record::{Algorithm, Field, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumVariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum Derivation {
    /// vertices / components, 0 where there are no components
    AverageComponentSize,
    /// element-wise shortest + longest
    PathTotal,
}

impl Derivation {
    pub fn inputs(&self) -> [&'static str; 2] {
        match self {
            Derivation::AverageComponentSize => ["vertices", "components"],
            Derivation::PathTotal => ["shortest", "longest"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Derivation::AverageComponentSize => "average_component_size",
            Derivation::PathTotal => "path_total",
        }
    }

    fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            // zero components is answered with zero rather than rejected; the
            // renderers log it as suspicious input
            Derivation::AverageComponentSize => {
                if b > 0.0 {
                    a / b
                } else {
                    0.0
                }
            }
            Derivation::PathTotal => a + b,
        }
    }

    pub fn compute(&self, inputs: &HashMap<&str, &[f64]>) -> Result<Vec<f64>> {
        let [first, second] = self.inputs();
        let lookup = |input: &str| {
            inputs
                .get(input)
                .copied()
                .ok_or_else(|| ReportError::MissingDerivationInput {
                    name: self.name().to_string(),
                    input: input.to_string(),
                })
        };
        let a = lookup(first)?;
        let b = lookup(second)?;
        if a.len() != b.len() {
            return Err(ReportError::DerivationInputMismatch {
                name: self.name().to_string(),
                lengths: vec![(first.to_string(), a.len()), (second.to_string(), b.len())],
            });
        }
        Ok(a.iter().zip(b).map(|(&x, &y)| self.apply(x, y)).collect())
    }
}

pub fn derive(name: &str, inputs: &HashMap<&str, &[f64]>) -> Result<Vec<f64>> {
    let derivation: Derivation = name
        .parse()
        .map_err(|_| ReportError::UnknownDerivation(name.to_string()))?;
    derivation.compute(inputs)
}

/// Per-dataset sum of `field` over the shortest and longest path records.
pub fn path_total(store: &RecordStore, field: Field) -> Result<Vec<f64>> {
    let shortest = store.series(Algorithm::ShortestPath, field)?;
    let longest = store.series(Algorithm::LongestPath, field)?;
    Derivation::PathTotal.compute(&HashMap::from([
        ("shortest", &shortest[..]),
        ("longest", &longest[..]),
    ]))
}
