//! The external computation module seam.

use std::cell::Cell;

use tracing::debug;

use crate::detector::ThresholdDetector;
use crate::error::ModuleFault;

/// An externally supplied unit exposing one anomaly-detection capability.
///
/// `init` is the only suspension point of a page; it is awaited once before
/// `detect` may be called. Futures are not required to be `Send` because the
/// page runs on a single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait ComputeModule {
    /// Prepare the module for use.
    async fn init(&self) -> Result<(), ModuleFault>;

    /// Run the detection capability on one value.
    fn detect(&self, value: f64) -> Result<bool, ModuleFault>;
}

/// In-process module backed by [`ThresholdDetector`].
#[derive(Debug, Default)]
pub struct BuiltinModule {
    detector: ThresholdDetector,
    ready: Cell<bool>,
}

impl BuiltinModule {
    pub fn new(detector: ThresholdDetector) -> Self {
        Self {
            detector,
            ready: Cell::new(false),
        }
    }

    pub fn detector(&self) -> &ThresholdDetector {
        &self.detector
    }
}

impl ComputeModule for BuiltinModule {
    async fn init(&self) -> Result<(), ModuleFault> {
        debug!(threshold = self.detector.threshold(), "built-in module ready");
        self.ready.set(true);
        Ok(())
    }

    fn detect(&self, value: f64) -> Result<bool, ModuleFault> {
        if !self.ready.get() {
            return Err(ModuleFault::new("module used before initialization"));
        }
        // The compiled export takes an f32; narrow the same way.
        Ok(self.detector.is_anomaly(value as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_before_init_is_a_fault() {
        let m = BuiltinModule::default();
        let err = m.detect(1.0).unwrap_err();
        assert!(err.message().contains("before initialization"));
    }

    #[test]
    fn detect_after_init_uses_threshold() {
        let m = BuiltinModule::new(ThresholdDetector::new(10.0));
        pollster::block_on(m.init()).unwrap();
        assert_eq!(m.detect(10.5), Ok(true));
        assert_eq!(m.detect(10.0), Ok(false));
    }
}
