use crate::predictor::Predictor;

/// Per-channel predictor state shared (by construction) between sender and receiver.
///
/// Only reconstructed values ever enter this state: a true sample is folded in
/// only when it was transmitted, so both endpoints always hold the same history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    last: f64,
    second_last: Option<f64>,
}

impl ChannelState {
    /// Both endpoints start synchronized on the first true sample.
    pub fn new(first: f64) -> Self {
        Self {
            last: first,
            second_last: None,
        }
    }

    pub fn forecast<P: Predictor>(&self, predictor: &P) -> f64 {
        predictor.predict(self.last, self.second_last)
    }

    /// Shifts the history by one reconstructed value.
    pub fn advance(&mut self, reconstructed: f64) {
        self.second_last = Some(self.last);
        self.last = reconstructed;
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn second_last(&self) -> Option<f64> {
        self.second_last
    }
}
