//! Error types shared by the page components.

use thiserror::Error;

use crate::page::Phase;

/// Opaque failure raised by the external computation module.
///
/// Carries only the module's own message; no cause is inferred from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ModuleFault {
    message: String,
}

impl ModuleFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Rejection produced by the input reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("not a number: {raw:?}")]
    NotANumber { raw: String },
    #[error("not a finite number: {raw:?}")]
    NotFinite { raw: String },
}

impl InputError {
    pub fn raw(&self) -> &str {
        match self {
            InputError::NotANumber { raw } | InputError::NotFinite { raw } => raw,
        }
    }
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to initialize compute module")]
    Initialization(#[source] ModuleFault),
    #[error("invalid input")]
    InvalidInput(#[from] InputError),
    #[error("detection call failed")]
    DetectionCall(#[source] ModuleFault),
    #[error("compute module is not ready (phase: {0:?})")]
    NotReady(Phase),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}
