use dualpred_core::RunSummary;
use std::fmt;

/// Human-readable rendering of a completed run.
///
/// Always renders the whole summary: one line per channel, then the shared
/// transmission figures.
pub struct SummaryReport<'a> {
    summary: &'a RunSummary,
}

impl<'a> SummaryReport<'a> {
    pub fn new(summary: &'a RunSummary) -> Self {
        Self { summary }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.summary)
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .summary
            .channels
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);
        for channel in &self.summary.channels {
            writeln!(f, "{:<width$} rmse = {}", channel.name, channel.rmse, width = width)?;
        }
        writeln!(
            f,
            "transmissions = {} / {}",
            self.summary.transmissions, self.summary.measurements
        )?;
        write!(f, "fraction sent = {}", self.summary.efficiency)
    }
}
