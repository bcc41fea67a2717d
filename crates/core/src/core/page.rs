//! Page components and their composition.
//!
//! Control flow is linear: the [`Initializer`] awaits the module once, then
//! every trigger activation goes through the [`TriggerHandler`] (input reader
//! followed by result renderer). Nothing after initialization suspends.

use tracing::{error, info};

use crate::config::DemoConfig;
use crate::error::{DemoError, ModuleFault};
use crate::input::InputReader;
use crate::module::ComputeModule;
use crate::render::{Outcome, ResultRenderer};
use crate::view::{Badge, ResultView, StatusView};

/// Initializer state. `Ready` and `Failed` are terminal for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Ready,
    Failed,
}

pub struct Initializer<S> {
    view: S,
    phase: Phase,
    failure: Option<ModuleFault>,
}

impl<S: StatusView> Initializer<S> {
    /// Put the status view in its initializing state with the trigger disabled.
    pub fn new(mut view: S) -> Self {
        view.show_status(&Badge::initializing());
        view.set_trigger_enabled(false);
        Self {
            view,
            phase: Phase::Initializing,
            failure: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> &S {
        &self.view
    }

    /// Await module initialization. Only the first call reaches the module.
    pub async fn run<M: ComputeModule>(&mut self, module: &M) -> Result<Phase, DemoError> {
        match self.phase {
            Phase::Ready => return Ok(Phase::Ready),
            Phase::Failed => {
                let fault = self
                    .failure
                    .clone()
                    .unwrap_or_else(|| ModuleFault::new("initialization failed"));
                return Err(DemoError::Initialization(fault));
            }
            Phase::Initializing => {}
        }

        match module.init().await {
            Ok(()) => {
                info!("compute module ready");
                self.phase = Phase::Ready;
                self.view.show_status(&Badge::ready());
                self.view.set_trigger_enabled(true);
                Ok(Phase::Ready)
            }
            Err(fault) => {
                error!(error = %fault, "failed to initialize compute module");
                self.phase = Phase::Failed;
                self.failure = Some(fault.clone());
                self.view.show_status(&Badge::failed());
                Err(DemoError::Initialization(fault))
            }
        }
    }
}

/// Handles one trigger activation: read input, then detect and render.
pub struct TriggerHandler<V> {
    reader: InputReader,
    renderer: ResultRenderer<V>,
}

impl<V: ResultView> TriggerHandler<V> {
    pub fn new(view: V, guard: bool) -> Self {
        Self {
            reader: InputReader::new(),
            renderer: ResultRenderer::new(view, guard),
        }
    }

    pub fn from_config(view: V, config: &DemoConfig) -> Self {
        Self::new(view, config.guard_detection)
    }

    pub fn view(&self) -> &V {
        self.renderer.view()
    }

    /// Rejected input never reaches the module.
    pub fn handle<M: ComputeModule>(&mut self, module: &M, raw: &str) -> Result<Outcome, DemoError> {
        match self.reader.read(raw) {
            Ok(value) => self.renderer.render_detection(module, value),
            Err(err) => Ok(self.renderer.render_rejection(err)),
        }
    }
}

/// One module wired to one status view and one result display.
pub struct DemoPage<M, S, R> {
    module: M,
    initializer: Initializer<S>,
    handler: TriggerHandler<R>,
}

impl<M, S, R> DemoPage<M, S, R>
where
    M: ComputeModule,
    S: StatusView,
    R: ResultView,
{
    pub fn new(module: M, status: S, results: R, config: DemoConfig) -> Self {
        Self {
            module,
            initializer: Initializer::new(status),
            handler: TriggerHandler::from_config(results, &config),
        }
    }

    pub fn phase(&self) -> Phase {
        self.initializer.phase()
    }

    pub fn module(&self) -> &M {
        &self.module
    }

    pub fn status_view(&self) -> &S {
        self.initializer.view()
    }

    pub fn result_view(&self) -> &R {
        self.handler.view()
    }

    pub async fn start(&mut self) -> Result<Phase, DemoError> {
        self.initializer.run(&self.module).await
    }

    /// Equivalent of activating the trigger control; refused unless ready.
    pub fn trigger(&mut self, raw: &str) -> Result<Outcome, DemoError> {
        match self.initializer.phase() {
            Phase::Ready => self.handler.handle(&self.module, raw),
            phase => Err(DemoError::NotReady(phase)),
        }
    }
}
