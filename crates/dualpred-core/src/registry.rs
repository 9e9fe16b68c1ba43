use crate::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSpec {
    pub name: String,
    pub threshold: f64,
}

/// The ordered set of channels a run gates jointly.
///
/// Registration order is preserved and becomes the column order of every
/// outcome and summary produced from this registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelRegistry {
    channels: Vec<ChannelSpec>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel with its own send threshold.
    ///
    /// Zero and `+inf` are accepted here: they are the all-sent and
    /// nothing-resent limits of the scheme. Negative and NaN thresholds are not.
    pub fn register(&mut self, name: &str, threshold: f64) -> Result<(), ConfigurationError> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ConfigurationError::InvalidThreshold {
                channel: name.to_string(),
                threshold,
            });
        }
        if self.contains(name) {
            return Err(ConfigurationError::DuplicateChannel(name.to_string()));
        }
        self.channels.push(ChannelSpec {
            name: name.to_string(),
            threshold,
        });
        Ok(())
    }

    /// Builder-style `register`.
    pub fn with(mut self, name: &str, threshold: f64) -> Result<Self, ConfigurationError> {
        self.register(name, threshold)?;
        Ok(self)
    }

    /// Same channels, every threshold replaced by `threshold`.
    pub fn with_uniform_threshold(&self, threshold: f64) -> Result<Self, ConfigurationError> {
        self.channels
            .iter()
            .try_fold(ChannelRegistry::new(), |acc, spec| acc.with(&spec.name, threshold))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.channels.iter().any(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelSpec> {
        self.channels.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
