use dualpred_core::{
    check_threshold, ChannelRegistry, ConfigurationError, DualPredError, DualPredictionEngine, Measurements,
    PredictorKind, RunSummary,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// One (predictor, threshold) point of a sweep and its scored run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub predictor: PredictorKind,
    pub threshold: f64,
    pub summary: RunSummary,
}

/// Fans independent simulation runs out over blocking workers.
///
/// ## Isolation
/// Every point builds its own engine from the base registry; the only
/// shared value is the read-only `Arc<Measurements>`. Runs are parallel to
/// each other, never within themselves.
pub struct SweepOrchestrator {
    measurements: Arc<Measurements>,
    channels: ChannelRegistry,
    workers: usize,
}

impl SweepOrchestrator {
    pub fn new(measurements: Arc<Measurements>, channels: ChannelRegistry) -> Self {
        Self {
            measurements,
            channels,
            workers: num_cpus::get().max(1),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every predictor against every threshold.
    ///
    /// Results come back ordered by predictor, then threshold, regardless of
    /// completion order. The first failing point aborts the sweep.
    pub async fn run(
        &self,
        predictors: &[PredictorKind],
        thresholds: &[f64],
    ) -> Result<Vec<SweepPoint>, DualPredError> {
        if self.channels.is_empty() {
            return Err(ConfigurationError::EmptyChannelSet.into());
        }

        // Validate the whole grid before spending any work on it.
        for &threshold in thresholds {
            for spec in self.channels.iter() {
                check_threshold(&spec.name, threshold)?;
            }
        }
        let mut plan = Vec::with_capacity(predictors.len() * thresholds.len());
        for &predictor in predictors {
            for &threshold in thresholds {
                let channels = self.channels.with_uniform_threshold(threshold)?;
                plan.push((predictor, threshold, channels));
            }
        }
        tracing::info!(
            "SweepOrchestrator: {} point(s) on {} worker(s)",
            plan.len(),
            self.workers
        );

        let total = plan.len();
        let permits = Arc::new(Semaphore::new(self.workers));
        let (result_tx, mut result_rx) = mpsc::channel(total.max(1));

        for (slot, (predictor, threshold, channels)) in plan.into_iter().enumerate() {
            let permits = permits.clone();
            let measurements = self.measurements.clone();
            let result_tx = result_tx.clone();

            tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else { return; };
                let joined = tokio::task::spawn_blocking(move || -> Result<SweepPoint, DualPredError> {
                    let engine = DualPredictionEngine::new(predictor, channels)?;
                    let outcome = engine.run(&measurements)?;
                    Ok(SweepPoint {
                        predictor,
                        threshold,
                        summary: RunSummary::score(&outcome),
                    })
                })
                .await;

                let result = match joined {
                    Ok(point) => point,
                    Err(e) => Err(DualPredError::Worker(e.to_string())),
                };
                let _ = result_tx.send((slot, result)).await;
            });
        }
        drop(result_tx);

        let mut slots: Vec<Option<SweepPoint>> = vec![None; total];
        while let Some((slot, result)) = result_rx.recv().await {
            let point = result?;
            tracing::debug!(
                "SweepOrchestrator: {} @ {} -> {:.3} sent",
                point.predictor,
                point.threshold,
                point.summary.efficiency
            );
            slots[slot] = Some(point);
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
