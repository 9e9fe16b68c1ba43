pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod measurement;
pub mod predictor;
pub mod registry;
pub mod score;

pub use channel::ChannelState;
pub use config::{check_threshold, ChannelConfig, SimulationConfig};
pub use engine::{simulate_series, DualPredictionEngine, ReconstructedChannel, SimulationOutcome};
pub use error::{ConfigurationError, DualPredError, InputFormatError};
pub use measurement::{Measurements, Series};
pub use predictor::{LastValue, MovingAverage, Predictor, PredictorKind, WeightedMovingAverage};
pub use registry::{ChannelRegistry, ChannelSpec};
pub use score::{efficiency, rmse, ChannelScore, RunSummary};

/// Fluent construction of a `DualPredictionEngine`.
///
/// Channels and predictor are fixed at `build`; nothing about a built engine
/// can change mid-run.
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    pub config: SimulationConfig,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Starts from an empty channel set and the linear predictor.
    pub fn new() -> Self {
        Self {
            config: SimulationConfig {
                channels: Vec::new(),
                ..SimulationConfig::default()
            },
        }
    }

    /// Adds a channel with its own send threshold.
    pub fn channel(mut self, name: &str, threshold: f64) -> Self {
        self.config.channels.push(ChannelConfig::new(name, threshold));
        self
    }

    pub fn predictor(mut self, kind: PredictorKind) -> Self {
        self.config.predictor = kind.tag().to_string();
        self
    }

    /// Overrides everything set so far.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<DualPredictionEngine, ConfigurationError> {
        let predictor = self.config.predictor_kind()?;
        let channels = self.config.registry()?;
        tracing::debug!(
            "SimulationBuilder: {} predictor over {:?}",
            predictor,
            channels.names()
        );
        DualPredictionEngine::new(predictor, channels)
    }
}
