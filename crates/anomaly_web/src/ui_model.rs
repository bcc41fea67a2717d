//! Page metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! element inventory on the host.

use anomaly_demo::config::DemoConfig;

pub const LOCALSTORAGE_CONFIG_KEY: &str = "anomaly_demo.config.v1";

/// Initial contents of the value field.
pub const DEFAULT_INPUT: &str = "0.7";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageElement {
    Status,
    Trigger,
    Input,
    Output,
}

impl PageElement {
    /// DOM id, kept stable for stylesheets and end-to-end scripts.
    pub fn id(self) -> &'static str {
        match self {
            PageElement::Status => "status",
            PageElement::Trigger => "run",
            PageElement::Input => "val",
            PageElement::Output => "out",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageElement::Status => "Module",
            PageElement::Trigger => "Detect",
            PageElement::Input => "Value",
            PageElement::Output => "Result",
        }
    }

    pub fn all() -> &'static [PageElement] {
        &[
            PageElement::Status,
            PageElement::Input,
            PageElement::Trigger,
            PageElement::Output,
        ]
    }
}

/// Parse a stored config; `None` for absent, `Err` for malformed.
pub fn parse_stored_config(raw: Option<&str>) -> Result<Option<DemoConfig>, String> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => DemoConfig::from_json_str(s)
            .map(Some)
            .map_err(|e| describe_error(&e)),
    }
}

/// Flatten an error and its sources into one console-friendly line.
pub fn describe_error(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut cur = e.source();
    while let Some(s) = cur {
        out.push_str(": ");
        out.push_str(&s.to_string());
        cur = s.source();
    }
    out
}
