use crate::channel::ChannelState;
use crate::error::{ConfigurationError, InputFormatError};
use crate::measurement::Measurements;
use crate::predictor::{Predictor, PredictorKind};
use crate::registry::{ChannelRegistry, ChannelSpec};

/// The transmission decision loop of the dual prediction scheme.
///
/// For every index after the first, each channel forecasts from its own
/// reconstructed history. If any channel misses its forecast by strictly more
/// than its threshold, the index is transmitted and every channel adopts its
/// true sample; otherwise every channel silently adopts its own forecast.
///
/// ## Determinism
/// A run is a single O(N * channels) pass with no shared mutable state, so an
/// engine can be reused for any number of runs, including from several threads.
#[derive(Debug, Clone)]
pub struct DualPredictionEngine<P: Predictor = PredictorKind> {
    predictor: P,
    channels: ChannelRegistry,
}

impl<P: Predictor> DualPredictionEngine<P> {
    /// At least one channel is required; an empty registry has nothing to gate on.
    pub fn new(predictor: P, channels: ChannelRegistry) -> Result<Self, ConfigurationError> {
        if channels.is_empty() {
            return Err(ConfigurationError::EmptyChannelSet);
        }
        Ok(Self {
            predictor,
            channels,
        })
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// Runs the scheme over `measurements`, one channel per registered name.
    ///
    /// Fails only if a registered channel is absent from `measurements`; the
    /// loop itself is total for any N >= 1.
    pub fn run(&self, measurements: &Measurements) -> Result<SimulationOutcome, InputFormatError> {
        let truths = self
            .channels
            .iter()
            .map(|spec| {
                measurements
                    .channel(&spec.name)
                    .ok_or_else(|| InputFormatError::MissingChannel(spec.name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let specs: Vec<&ChannelSpec> = self.channels.iter().collect();
        let n = measurements.len();
        tracing::info!(
            "DecisionLoop: {} channel(s) x {} samples",
            specs.len(),
            n
        );

        let mut states: Vec<ChannelState> = truths.iter().map(|t| ChannelState::new(t[0])).collect();
        let mut reconstructed: Vec<Vec<f64>> = truths
            .iter()
            .map(|t| {
                let mut r = Vec::with_capacity(n);
                r.push(t[0]);
                r
            })
            .collect();
        let mut sent = Vec::with_capacity(n);
        sent.push(true);
        let mut transmissions = 1usize;
        let mut forecasts = vec![0.0f64; specs.len()];

        for i in 1..n {
            // Every channel forecasts before the gate, no short-circuit.
            let mut transmit = false;
            for (c, state) in states.iter().enumerate() {
                let forecast = state.forecast(&self.predictor);
                forecasts[c] = forecast;
                if exceeds_threshold(truths[c][i], forecast, specs[c].threshold) {
                    transmit = true;
                }
            }

            if transmit {
                transmissions += 1;
                tracing::debug!("DecisionLoop: index {} transmitted", i);
            }

            for (c, state) in states.iter_mut().enumerate() {
                let value = if transmit { truths[c][i] } else { forecasts[c] };
                state.advance(value);
                reconstructed[c].push(value);
            }
            sent.push(transmit);
        }

        if n > 1 && transmissions == n {
            tracing::warn!("DecisionLoop: every sample was transmitted; thresholds suppress nothing");
        }
        tracing::info!("DecisionLoop: {} of {} samples transmitted", transmissions, n);

        let channels = specs
            .iter()
            .zip(truths)
            .zip(reconstructed)
            .map(|((spec, truth), reconstructed)| ReconstructedChannel {
                name: spec.name.clone(),
                threshold: spec.threshold,
                truth: truth.to_vec(),
                reconstructed,
            })
            .collect();

        Ok(SimulationOutcome {
            channels,
            sent,
            transmissions,
        })
    }
}

/// Strict: a deviation exactly equal to the threshold is suppressed.
pub fn exceeds_threshold(actual: f64, predicted: f64, threshold: f64) -> bool {
    (actual - predicted).abs() > threshold
}

/// The single-channel contract: reconstruct `truth` under `threshold`.
pub fn simulate_series<P: Predictor>(
    predictor: P,
    truth: &[f64],
    threshold: f64,
) -> Result<SimulationOutcome, crate::DualPredError> {
    let channels = ChannelRegistry::new().with("series", threshold)?;
    let measurements = Measurements::single("series", truth.to_vec())?;
    Ok(DualPredictionEngine::new(predictor, channels)?.run(&measurements)?)
}

/// One channel's true and reconstructed sequences after a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedChannel {
    name: String,
    threshold: f64,
    truth: Vec<f64>,
    reconstructed: Vec<f64>,
}

impl ReconstructedChannel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn truth(&self) -> &[f64] {
        &self.truth
    }

    pub fn reconstructed(&self) -> &[f64] {
        &self.reconstructed
    }

    /// Largest |R[i] - T[i]| over the run.
    pub fn max_abs_error(&self) -> f64 {
        self.truth
            .iter()
            .zip(&self.reconstructed)
            .map(|(t, r)| (r - t).abs())
            .fold(0.0, f64::max)
    }
}

/// The finalized result of one decision-loop pass.
///
/// Only `DualPredictionEngine::run` can build one, so anything holding an
/// outcome holds complete reconstructions.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    channels: Vec<ReconstructedChannel>,
    sent: Vec<bool>,
    transmissions: usize,
}

impl SimulationOutcome {
    pub fn channels(&self) -> &[ReconstructedChannel] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&ReconstructedChannel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Per-index transmission flags; `sent()[0]` is always true.
    pub fn sent(&self) -> &[bool] {
        &self.sent
    }

    pub fn transmissions(&self) -> usize {
        self.transmissions
    }

    pub fn suppressed(&self) -> usize {
        self.len() - self.transmissions
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}
