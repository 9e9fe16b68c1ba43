use crate::error::ConfigurationError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Forecasts the next sample of a channel from its reconstructed history.
///
/// Sender and receiver run the same predictor over the same reconstructed
/// values, so implementations must be pure: identical inputs, identical output.
pub trait Predictor {
    fn predict(&self, last: f64, second_last: Option<f64>) -> f64;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, last: f64, second_last: Option<f64>) -> f64 {
        (**self).predict(last, second_last)
    }
}

/// Repeats the last reconstructed value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastValue;

impl Predictor for LastValue {
    fn predict(&self, last: f64, _second_last: Option<f64>) -> f64 {
        last
    }
}

/// Mean of the last two reconstructed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovingAverage;

impl Predictor for MovingAverage {
    fn predict(&self, last: f64, second_last: Option<f64>) -> f64 {
        match second_last {
            Some(prev) => (last + prev) / 2.0,
            None => last,
        }
    }
}

/// 3:1 weighting in favour of the most recent reconstructed value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMovingAverage;

impl WeightedMovingAverage {
    pub const LAST_WEIGHT: f64 = 0.75;
    pub const SECOND_LAST_WEIGHT: f64 = 0.25;
}

impl Predictor for WeightedMovingAverage {
    fn predict(&self, last: f64, second_last: Option<f64>) -> f64 {
        match second_last {
            Some(prev) => last * Self::LAST_WEIGHT + prev * Self::SECOND_LAST_WEIGHT,
            None => last,
        }
    }
}

/// The predictor variant selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PredictorKind {
    #[default]
    Linear,
    MovingAverage,
    WeightedMovingAverage,
}

impl PredictorKind {
    pub const ALL: [PredictorKind; 3] = [
        PredictorKind::Linear,
        PredictorKind::MovingAverage,
        PredictorKind::WeightedMovingAverage,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            PredictorKind::Linear => "linear",
            PredictorKind::MovingAverage => "moving-average",
            PredictorKind::WeightedMovingAverage => "weighted-moving-average",
        }
    }
}

impl Predictor for PredictorKind {
    fn predict(&self, last: f64, second_last: Option<f64>) -> f64 {
        match self {
            PredictorKind::Linear => LastValue.predict(last, second_last),
            PredictorKind::MovingAverage => MovingAverage.predict(last, second_last),
            PredictorKind::WeightedMovingAverage => {
                WeightedMovingAverage.predict(last, second_last)
            }
        }
    }
}

impl FromStr for PredictorKind {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "linear" | "last-value" => Ok(PredictorKind::Linear),
            "moving-average" => Ok(PredictorKind::MovingAverage),
            "weighted-moving-average" => Ok(PredictorKind::WeightedMovingAverage),
            _ => Err(ConfigurationError::UnsupportedPredictor(raw.to_string())),
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for PredictorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}
