use crate::error::{ConfigurationError, DualPredError};
use crate::predictor::PredictorKind;
use crate::registry::ChannelRegistry;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User-supplied thresholds must be finite and strictly positive.
pub fn check_threshold(channel: &str, threshold: f64) -> Result<(), ConfigurationError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(ConfigurationError::InvalidThreshold {
            channel: channel.to_string(),
            threshold,
        });
    }
    Ok(())
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChannelConfig {
    pub name: String,
    pub threshold: f64,
}

impl ChannelConfig {
    pub fn new(name: &str, threshold: f64) -> Self {
        Self {
            name: name.to_string(),
            threshold,
        }
    }
}

/// Run parameters, read once at startup and immutable afterwards.
///
/// ```toml
/// input = "measurements.csv"
/// predictor = "moving-average"
///
/// [[channels]]
/// name = "temperature"
/// threshold = 10.0
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub input: PathBuf,
    /// Kept as the raw tag so an unknown variant surfaces as a
    /// `ConfigurationError` rather than a parse failure.
    pub predictor: String,
    pub channels: Vec<ChannelConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::one_dimensional()
    }
}

impl SimulationConfig {
    pub const DEFAULT_INPUT: &'static str = "measurements.csv";
    pub const DEFAULT_THRESHOLD: f64 = 10.0;

    /// Temperature only, last-value prediction.
    pub fn one_dimensional() -> Self {
        Self {
            input: PathBuf::from(Self::DEFAULT_INPUT),
            predictor: PredictorKind::Linear.tag().to_string(),
            channels: vec![ChannelConfig::new("temperature", Self::DEFAULT_THRESHOLD)],
        }
    }

    /// Temperature and pressure gated together, moving-average prediction.
    pub fn two_dimensional() -> Self {
        Self {
            input: PathBuf::from(Self::DEFAULT_INPUT),
            predictor: PredictorKind::MovingAverage.tag().to_string(),
            channels: vec![
                ChannelConfig::new("temperature", Self::DEFAULT_THRESHOLD),
                ChannelConfig::new("pressure", Self::DEFAULT_THRESHOLD),
            ],
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigurationError> {
        let config: SimulationConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DualPredError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!("Config: loaded {}", path.display());
        Ok(config)
    }

    pub fn predictor_kind(&self) -> Result<PredictorKind, ConfigurationError> {
        self.predictor.parse()
    }

    /// Thresholds must be finite and strictly positive at this surface.
    pub fn registry(&self) -> Result<ChannelRegistry, ConfigurationError> {
        if self.channels.is_empty() {
            return Err(ConfigurationError::EmptyChannelSet);
        }
        let mut registry = ChannelRegistry::new();
        for channel in &self.channels {
            check_threshold(&channel.name, channel.threshold)?;
            registry.register(&channel.name, channel.threshold)?;
        }
        Ok(registry)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.predictor_kind()?;
        self.registry()?;
        Ok(())
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }

    /// Applies one threshold to every channel.
    pub fn set_threshold(&mut self, threshold: f64) {
        for channel in &mut self.channels {
            channel.threshold = threshold;
        }
    }
}
