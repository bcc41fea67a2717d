//! UI surface seams: one status indicator plus trigger, one result display.

use tracing::error;

use crate::error::ModuleFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Ok,
    Warn,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Neutral => "",
            Tone::Ok => "ok",
            Tone::Warn => "warn",
        }
    }
}

/// Status indicator content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    pub fn initializing() -> Self {
        Self {
            text: "Initializing WASM...".to_string(),
            tone: Tone::Neutral,
        }
    }

    pub fn ready() -> Self {
        Self {
            text: "Ready".to_string(),
            tone: Tone::Ok,
        }
    }

    pub fn failed() -> Self {
        Self {
            text: "Failed to init WASM".to_string(),
            tone: Tone::Warn,
        }
    }

    pub fn class(&self) -> String {
        match self.tone {
            Tone::Neutral => "badge".to_string(),
            tone => format!("badge {}", tone.css_class()),
        }
    }
}

/// Result display content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub text: String,
    pub tone: Tone,
}

impl Rendered {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn class(&self) -> &'static str {
        self.tone.css_class()
    }
}

/// Status indicator and trigger control. Written only by the initializer.
pub trait StatusView {
    fn show_status(&mut self, badge: &Badge);
    fn set_trigger_enabled(&mut self, enabled: bool);
}

/// Result display. Written only by the result renderer.
pub trait ResultView {
    fn show_result(&mut self, rendered: &Rendered);

    /// Diagnostic channel for a guarded detection fault.
    fn report_fault(&mut self, fault: &ModuleFault) {
        error!(error = %fault, "detection call failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_classes() {
        assert_eq!(Badge::initializing().class(), "badge");
        assert_eq!(Badge::ready().class(), "badge ok");
        assert_eq!(Badge::failed().class(), "badge warn");
    }

    #[test]
    fn rendered_class_follows_tone() {
        assert_eq!(Rendered::new("x", Tone::Warn).class(), "warn");
        assert_eq!(Rendered::new("x", Tone::Ok).class(), "ok");
        assert_eq!(Rendered::default().class(), "");
    }
}
