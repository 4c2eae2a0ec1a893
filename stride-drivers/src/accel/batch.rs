//! Sample batching
//!
//! The sensor is polled at the configured rate and samples are handed on
//! in batches, the way the accelerometer service on a watch platform
//! delivers them.

use stride_core::config::{PedometerConfig, MAX_BATCH_SAMPLES};
use stride_core::pedometer::{AccelBatch, AccelSample};

/// Accumulates samples into fixed-size batches
#[derive(Debug, Clone)]
pub struct BatchCollector {
    batch: AccelBatch,
    size: usize,
}

impl BatchCollector {
    /// Create a collector producing batches of `size` samples
    ///
    /// `size` is clamped to 1..=MAX_BATCH_SAMPLES.
    pub fn new(size: usize) -> Self {
        Self {
            batch: AccelBatch::new(),
            size: size.clamp(1, MAX_BATCH_SAMPLES),
        }
    }

    pub fn from_config(config: &PedometerConfig) -> Self {
        Self::new(config.samples_per_batch as usize)
    }

    /// Add a sample; returns the batch once it is complete
    pub fn push(&mut self, sample: AccelSample) -> Option<AccelBatch> {
        // Capacity is at least `size`, so this cannot fail
        let _ = self.batch.push(sample);
        if self.batch.len() < self.size {
            return None;
        }
        Some(core::mem::take(&mut self.batch))
    }

    /// Samples collected towards the next batch
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    pub fn batch_size(&self) -> usize {
        self.size
    }
}
