//! Test doubles for the module and view seams.

use std::cell::{Cell, RefCell};

use crate::error::ModuleFault;
use crate::module::ComputeModule;
use crate::view::{Badge, Rendered, ResultView, StatusView};

/// Module that replays fixed answers and records every call.
pub(crate) struct ScriptedModule {
    init: Result<(), ModuleFault>,
    detect: Result<bool, ModuleFault>,
    pub(crate) init_calls: Cell<u32>,
    pub(crate) detect_calls: RefCell<Vec<f64>>,
}

impl ScriptedModule {
    pub(crate) fn new(init: Result<(), ModuleFault>, detect: Result<bool, ModuleFault>) -> Self {
        Self {
            init,
            detect,
            init_calls: Cell::new(0),
            detect_calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn ready_with(detect: Result<bool, ModuleFault>) -> Self {
        Self::new(Ok(()), detect)
    }

    pub(crate) fn failing_init(message: &str) -> Self {
        Self::new(Err(ModuleFault::new(message)), Ok(false))
    }

    pub(crate) fn detect_calls(&self) -> Vec<f64> {
        self.detect_calls.borrow().clone()
    }
}

impl ComputeModule for ScriptedModule {
    async fn init(&self) -> Result<(), ModuleFault> {
        self.init_calls.set(self.init_calls.get() + 1);
        self.init.clone()
    }

    fn detect(&self, value: f64) -> Result<bool, ModuleFault> {
        self.detect_calls.borrow_mut().push(value);
        self.detect.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingStatus {
    pub(crate) badges: Vec<Badge>,
    pub(crate) trigger_enabled: bool,
    pub(crate) trigger_writes: u32,
}

impl RecordingStatus {
    pub(crate) fn last(&self) -> Option<&Badge> {
        self.badges.last()
    }
}

impl StatusView for RecordingStatus {
    fn show_status(&mut self, badge: &Badge) {
        self.badges.push(badge.clone());
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
        self.trigger_writes += 1;
    }
}

#[derive(Default)]
pub(crate) struct RecordingResults {
    pub(crate) shown: Vec<Rendered>,
    pub(crate) faults: Vec<String>,
}

impl RecordingResults {
    pub(crate) fn last(&self) -> Option<&Rendered> {
        self.shown.last()
    }
}

impl ResultView for RecordingResults {
    fn show_result(&mut self, rendered: &Rendered) {
        self.shown.push(rendered.clone());
    }

    fn report_fault(&mut self, fault: &ModuleFault) {
        self.faults.push(fault.message().to_string());
    }
}
