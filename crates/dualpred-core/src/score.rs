use crate::engine::SimulationOutcome;
use serde::Serialize;

/// Root-mean-square error between a true and a reconstructed sequence.
///
/// Population mean: the divisor is exactly `truth.len()`, and index 0 (always
/// exact) is included.
pub fn rmse(truth: &[f64], reconstructed: &[f64]) -> f64 {
    debug_assert_eq!(truth.len(), reconstructed.len());
    if truth.is_empty() {
        return 0.0;
    }
    let sum: f64 = truth
        .iter()
        .zip(reconstructed)
        .map(|(t, r)| (r - t).powi(2))
        .sum();
    (sum / truth.len() as f64).sqrt()
}

/// Fraction of indices actually transmitted, in (0, 1] for any real run.
pub fn efficiency(transmissions: usize, measurements: usize) -> f64 {
    if measurements == 0 {
        return 0.0;
    }
    transmissions as f64 / measurements as f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelScore {
    pub name: String,
    pub threshold: f64,
    pub rmse: f64,
    pub max_abs_error: f64,
}

/// Accuracy and efficiency of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub channels: Vec<ChannelScore>,
    pub transmissions: usize,
    pub measurements: usize,
    pub efficiency: f64,
}

impl RunSummary {
    pub fn score(outcome: &SimulationOutcome) -> Self {
        let channels = outcome
            .channels()
            .iter()
            .map(|c| ChannelScore {
                name: c.name().to_string(),
                threshold: c.threshold(),
                rmse: rmse(c.truth(), c.reconstructed()),
                max_abs_error: c.max_abs_error(),
            })
            .collect();

        Self {
            channels,
            transmissions: outcome.transmissions(),
            measurements: outcome.len(),
            efficiency: efficiency(outcome.transmissions(), outcome.len()),
        }
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelScore> {
        self.channels.iter().find(|c| c.name == name)
    }
}

impl From<&SimulationOutcome> for RunSummary {
    fn from(outcome: &SimulationOutcome) -> Self {
        RunSummary::score(outcome)
    }
}
