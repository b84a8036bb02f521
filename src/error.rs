use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("unknown field '{field}' for algorithm '{algorithm}'")]
    UnknownField { algorithm: String, field: String },
    #[error("series {name} has {actual} entries, but there are {expected} datasets")]
    MisalignedSeries {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("inputs of derivation {name} disagree in length: {lengths:?}")]
    DerivationInputMismatch {
        name: String,
        lengths: Vec<(String, usize)>,
    },
    #[error("unknown derivation '{0}'")]
    UnknownDerivation(String),
    #[error("derivation {name} is missing input '{input}'")]
    MissingDerivationInput { name: String, input: String },
    #[error("error in line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("dataset {dataset} has more than one record for algorithm {algorithm}")]
    DuplicateRecord { dataset: String, algorithm: String },
    #[error("dataset {0} appears more than once in the dataset order")]
    DuplicateDataset(String),
    #[error("record refers to dataset {0}, which is not part of the dataset order")]
    UnknownDataset(String),
    #[error("cannot produce {artifact}: {reason}")]
    RenderFailure { artifact: String, reason: String },
}

impl ReportError {
    /// `false` only for failures of the output environment (unwritable
    /// destination, broken template), `true` for anything wrong with the data.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, ReportError::RenderFailure { .. })
    }

    pub fn render_failure<E: std::fmt::Display>(artifact: &str, err: E) -> Self {
        ReportError::RenderFailure {
            artifact: artifact.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
