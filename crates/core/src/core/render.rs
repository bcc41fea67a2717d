//! Verdict rendering.

use tracing::{debug, warn};

use crate::error::{DemoError, InputError, ModuleFault};
use crate::module::ComputeModule;
use crate::value_fmt::fmt_value;
use crate::view::{Rendered, ResultView, Tone};

pub const INVALID_INPUT_MESSAGE: &str = "Please enter a number";
pub const DETECTION_FAILED_MESSAGE: &str = "Detection failed; see console for details";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub value: f64,
    pub anomaly: bool,
}

impl Detection {
    pub fn rendered(&self) -> Rendered {
        let v = fmt_value(self.value);
        if self.anomaly {
            Rendered::new(format!("Anomaly detected at {v}"), Tone::Warn)
        } else {
            Rendered::new(format!("No anomaly at {v}"), Tone::Ok)
        }
    }
}

/// What one trigger activation produced. Every variant has been rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Detected(Detection),
    Rejected(InputError),
    /// Guarded detection fault.
    Faulted(ModuleFault),
}

impl Outcome {
    pub fn into_result(self) -> Result<Detection, DemoError> {
        match self {
            Outcome::Detected(d) => Ok(d),
            Outcome::Rejected(e) => Err(DemoError::InvalidInput(e)),
            Outcome::Faulted(f) => Err(DemoError::DetectionCall(f)),
        }
    }
}

pub struct ResultRenderer<V> {
    view: V,
    guard: bool,
}

impl<V: ResultView> ResultRenderer<V> {
    pub fn new(view: V, guard: bool) -> Self {
        Self { view, guard }
    }

    pub fn is_guarded(&self) -> bool {
        self.guard
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn render_rejection(&mut self, err: InputError) -> Outcome {
        debug!(raw = err.raw(), "rejected input");
        self.view
            .show_result(&Rendered::new(INVALID_INPUT_MESSAGE, Tone::Warn));
        Outcome::Rejected(err)
    }

    /// Call the detection capability and render its verdict.
    ///
    /// Unguarded faults are returned without touching the display.
    pub fn render_detection<M: ComputeModule>(
        &mut self,
        module: &M,
        value: f64,
    ) -> Result<Outcome, DemoError> {
        match module.detect(value) {
            Ok(anomaly) => {
                let detection = Detection { value, anomaly };
                self.view.show_result(&detection.rendered());
                Ok(Outcome::Detected(detection))
            }
            Err(fault) if self.guard => {
                self.view.report_fault(&fault);
                self.view
                    .show_result(&Rendered::new(DETECTION_FAILED_MESSAGE, Tone::Warn));
                Ok(Outcome::Faulted(fault))
            }
            Err(fault) => {
                warn!(error = %fault, "unguarded detection fault");
                Err(DemoError::DetectionCall(fault))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingResults, ScriptedModule};

    #[test]
    fn true_verdict_renders_warning() {
        let module = ScriptedModule::ready_with(Ok(true));
        let mut r = ResultRenderer::new(RecordingResults::default(), true);
        let out = r.render_detection(&module, 5.0).unwrap();

        assert!(matches!(out, Outcome::Detected(Detection { anomaly: true, .. })));
        let shown = r.view().last().unwrap();
        assert_eq!(shown.text, "Anomaly detected at 5");
        assert_eq!(shown.class(), "warn");
    }

    #[test]
    fn false_verdict_renders_normal() {
        let module = ScriptedModule::ready_with(Ok(false));
        let mut r = ResultRenderer::new(RecordingResults::default(), true);
        r.render_detection(&module, 5.0).unwrap();

        let shown = r.view().last().unwrap();
        assert_eq!(shown.text, "No anomaly at 5");
        assert_eq!(shown.class(), "ok");
    }

    #[test]
    fn guarded_fault_renders_generic_message() {
        let module = ScriptedModule::ready_with(Err(ModuleFault::new("trap")));
        let mut r = ResultRenderer::new(RecordingResults::default(), true);
        let out = r.render_detection(&module, 1.0).unwrap();

        assert_eq!(out, Outcome::Faulted(ModuleFault::new("trap")));
        assert_eq!(r.view().last().unwrap().text, DETECTION_FAILED_MESSAGE);
        assert_eq!(r.view().last().unwrap().tone, Tone::Warn);
        assert_eq!(r.view().faults, vec!["trap".to_string()]);
    }

    #[test]
    fn unguarded_fault_propagates_and_leaves_display() {
        let module = ScriptedModule::ready_with(Err(ModuleFault::new("trap")));
        let mut r = ResultRenderer::new(RecordingResults::default(), false);
        let err = r.render_detection(&module, 1.0).unwrap_err();

        assert!(matches!(err, DemoError::DetectionCall(f) if f.message() == "trap"));
        assert!(r.view().shown.is_empty());
        assert!(r.view().faults.is_empty());
    }

    #[test]
    fn outcome_into_result_maps_error_kinds() {
        let rejected = Outcome::Rejected(InputError::NotANumber { raw: "x".into() });
        assert!(matches!(
            rejected.into_result(),
            Err(DemoError::InvalidInput(_))
        ));
        let faulted = Outcome::Faulted(ModuleFault::new("boom"));
        assert!(matches!(
            faulted.into_result(),
            Err(DemoError::DetectionCall(_))
        ));
    }
}
