//! Built-in detection rule.
//!
//! A value is flagged when it exceeds a fixed threshold. This is the rule the
//! compiled demo module ships with; the page treats any module as opaque and
//! never relies on it.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdDetector {
    threshold: f32,
}

impl Default for ThresholdDetector {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl ThresholdDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[inline]
    pub fn is_anomaly(&self, value: f32) -> bool {
        value > self.threshold
    }
}

/// Export consumed by the page when this crate is built as the module.
#[cfg(feature = "wasm")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn detect_anomaly(value: f32) -> bool {
    ThresholdDetector::default().is_anomaly(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_strictly_above_threshold() {
        let d = ThresholdDetector::default();
        assert!(!d.is_anomaly(0.5));
        assert!(d.is_anomaly(0.500_001));
        assert!(!d.is_anomaly(-3.0));
        assert!(d.is_anomaly(5.0));
    }

    #[test]
    fn nan_is_never_flagged() {
        assert!(!ThresholdDetector::new(0.0).is_anomaly(f32::NAN));
    }
}
