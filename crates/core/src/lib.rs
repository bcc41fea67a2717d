//! # anomaly_demo
//!
//! Glue between a compiled anomaly-detection module and a tiny interactive
//! surface: initialize the module once, read one number per trigger, render
//! the module's verdict.
//!
//! ## Quick Start
//!
//! ```
//! use anomaly_demo::prelude::*;
//!
//! # struct Status;
//! # impl StatusView for Status {
//! #     fn show_status(&mut self, _badge: &Badge) {}
//! #     fn set_trigger_enabled(&mut self, _enabled: bool) {}
//! # }
//! # struct Out;
//! # impl ResultView for Out {
//! #     fn show_result(&mut self, _rendered: &Rendered) {}
//! # }
//! let module = BuiltinModule::new(ThresholdDetector::default());
//! let mut page = DemoPage::new(module, Status, Out, DemoConfig::default());
//!
//! pollster::block_on(page.start()).unwrap();
//! let outcome = page.trigger("0.7").unwrap();
//! assert!(matches!(outcome, Outcome::Detected(d) if d.anomaly));
//! ```
//!
//! ## Feature Flags
//!
//! - `wasm`: export `detect_anomaly` through wasm-bindgen, turning this crate
//!   into the external computation module itself.
//!
//! ## Modules
//!
//! - [`module`]: the external computation module seam and the built-in module
//! - [`input`]: numeric input parsing
//! - [`render`]: verdict rendering
//! - [`page`]: initializer state machine and page composition

#[path = "core/error.rs"]
pub mod error;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/detector.rs"]
pub mod detector;

#[path = "core/module.rs"]
pub mod module;

#[path = "core/input.rs"]
pub mod input;

#[path = "core/value_fmt.rs"]
pub mod value_fmt;

#[path = "core/view.rs"]
pub mod view;

#[path = "core/render.rs"]
pub mod render;

#[path = "core/page.rs"]
pub mod page;

#[cfg(test)]
#[path = "core/testing.rs"]
mod testing;

/// Prelude module for convenient imports.
///
/// ```
/// use anomaly_demo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DemoConfig, ModuleSource};
    pub use crate::detector::ThresholdDetector;
    pub use crate::error::{ConfigError, DemoError, InputError, ModuleFault};
    pub use crate::input::InputReader;
    pub use crate::module::{BuiltinModule, ComputeModule};
    pub use crate::page::{DemoPage, Initializer, Phase, TriggerHandler};
    pub use crate::render::{Detection, Outcome, ResultRenderer};
    pub use crate::view::{Badge, Rendered, ResultView, StatusView, Tone};
}
