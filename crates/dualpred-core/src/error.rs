use thiserror::Error;

/// Rejected before any simulation starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("unsupported predictor `{0}` (expected linear, moving-average or weighted-moving-average)")]
    UnsupportedPredictor(String),
    #[error("channel `{channel}` has invalid threshold {threshold}")]
    InvalidThreshold { channel: String, threshold: f64 },
    #[error("channel set is empty")]
    EmptyChannelSet,
    #[error("channel `{0}` is configured more than once")]
    DuplicateChannel(String),
    #[error("malformed configuration: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(e: toml::de::Error) -> Self {
        ConfigurationError::Parse(e.to_string())
    }
}

/// Raised while turning raw records into `Measurements`. Line numbers are 1-based
/// and count the header.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputFormatError {
    #[error("input has no header line")]
    MissingHeader,
    #[error("input contains no measurements")]
    EmptyInput,
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount { line: usize, expected: usize, found: usize },
    #[error("line {line}: record is not valid UTF-8")]
    InvalidEncoding { line: usize },
    #[error("line {line}: column `{column}` is not a finite number: `{value}`")]
    NonNumeric { line: usize, column: String, value: String },
    #[error("channel `{channel}` has {found} samples, expected {expected}")]
    UnequalLength { channel: String, expected: usize, found: usize },
    #[error("channel `{0}` appears more than once in the input")]
    DuplicateChannel(String),
    #[error("channel `{0}` is not present in the input")]
    MissingChannel(String),
}

#[derive(Debug, Error)]
pub enum DualPredError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("input format error: {0}")]
    InputFormat(#[from] InputFormatError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("simulation worker failed: {0}")]
    Worker(String),
}
