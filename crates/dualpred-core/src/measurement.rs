use crate::error::InputFormatError;

/// One scalar channel of chronologically ordered samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A complete, already-ordered multi-channel measurement set.
///
/// Every channel has the same length N >= 1 and every sample is finite.
/// There is no way to mutate a `Measurements` after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    series: Vec<Series>,
    len: usize,
}

impl Measurements {
    pub fn new(series: Vec<Series>) -> Result<Self, InputFormatError> {
        let first = series.first().ok_or(InputFormatError::EmptyInput)?;
        let len = first.values.len();
        if len == 0 {
            return Err(InputFormatError::EmptyInput);
        }

        for (idx, s) in series.iter().enumerate() {
            if series[..idx].iter().any(|prev| prev.name == s.name) {
                return Err(InputFormatError::DuplicateChannel(s.name.clone()));
            }
            if s.values.len() != len {
                return Err(InputFormatError::UnequalLength {
                    channel: s.name.clone(),
                    expected: len,
                    found: s.values.len(),
                });
            }
            if let Some((row, bad)) = s.values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(InputFormatError::NonNumeric {
                    // +1 for 1-based, +1 for the header line
                    line: row + 2,
                    column: s.name.clone(),
                    value: bad.to_string(),
                });
            }
        }

        Ok(Self { series, len })
    }

    /// Convenience for the one-dimensional case.
    pub fn single(name: impl Into<String>, values: Vec<f64>) -> Result<Self, InputFormatError> {
        Self::new(vec![Series::new(name, values)])
    }

    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of samples per channel (N).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
