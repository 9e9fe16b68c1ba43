pub mod report;
pub use report::SummaryReport;

use dualpred_core::{DualPredError, InputFormatError, Measurements, Series};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Decodes comma-separated measurement records into `Measurements`.
///
/// The first line is a header of column names and never data. Requested
/// channels bind to header columns by name when every name is present, and
/// to the leading columns in order when none is. A header naming only some
/// of them is rejected.
pub struct MeasurementCodec;

impl MeasurementCodec {
    pub fn load(path: impl AsRef<Path>, channels: &[String]) -> Result<Measurements, DualPredError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let measurements = Self::decode(BufReader::new(file), channels)?;
        tracing::info!(
            "MeasurementCodec: {} samples x {} channel(s) from {}",
            measurements.len(),
            channels.len(),
            path.display()
        );
        Ok(measurements)
    }

    /// Nothing partial is ever returned: the first bad record aborts decoding.
    pub fn decode<R: BufRead>(reader: R, channels: &[String]) -> Result<Measurements, DualPredError> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => read_record(line, 1)?,
            None => return Err(InputFormatError::MissingHeader.into()),
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if header.trim().is_empty() {
            return Err(InputFormatError::MissingHeader.into());
        }
        let bindings = bind_columns(&columns, channels)?;

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); channels.len()];
        for (idx, line) in lines.enumerate() {
            // header is line 1
            let line_no = idx + 2;
            let line = read_record(line, line_no)?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != columns.len() {
                return Err(InputFormatError::FieldCount {
                    line: line_no,
                    expected: columns.len(),
                    found: fields.len(),
                }
                .into());
            }

            for (slot, &column) in bindings.iter().enumerate() {
                let raw = fields[column];
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| InputFormatError::NonNumeric {
                        line: line_no,
                        column: channels[slot].clone(),
                        value: raw.to_string(),
                    })?;
                values[slot].push(value);
            }
        }

        let series = channels
            .iter()
            .zip(values)
            .map(|(name, v)| Series::new(name.as_str(), v))
            .collect();
        Ok(Measurements::new(series)?)
    }
}

/// Undecodable bytes are a malformed record, not a failed read.
fn read_record(line: std::io::Result<String>, line_no: usize) -> Result<String, DualPredError> {
    match line {
        Ok(line) => Ok(line),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            Err(InputFormatError::InvalidEncoding { line: line_no }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Maps each requested channel to a header column index.
///
/// All names present: bind by name. No name present: bind positionally.
/// Anything in between names the first channel the header lacks.
fn bind_columns(columns: &[&str], channels: &[String]) -> Result<Vec<usize>, InputFormatError> {
    let by_name: Vec<Option<usize>> = channels
        .iter()
        .map(|name| columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
        .collect();
    if by_name.iter().all(Option::is_some) {
        return Ok(by_name.into_iter().flatten().collect());
    }
    if by_name.iter().any(Option::is_some) {
        let missing = by_name.iter().position(Option::is_none).unwrap_or_default();
        return Err(InputFormatError::MissingChannel(channels[missing].clone()));
    }

    if channels.len() > columns.len() {
        return Err(InputFormatError::FieldCount {
            line: 1,
            expected: channels.len(),
            found: columns.len(),
        });
    }
    tracing::debug!("MeasurementCodec: header {:?} bound positionally", columns);
    Ok((0..channels.len()).collect())
}
