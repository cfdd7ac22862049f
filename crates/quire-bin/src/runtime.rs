//! Blocking event loop: one `poll_event` call drives everything.

use core_actions::{Action, CommandRegistry, dispatch, translate_key};
use core_config::Config;
use core_events::InputEvent;
use core_model::{EditorModel, Layout};
use core_plugin::PluginHost;
use core_terminal::Screen;
use std::fmt;
use tracing::{error, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownReason {
    CtrlC,
    CommandQuit,
    InputClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::CommandQuit => "command_quit",
            ShutdownReason::InputClosed => "input_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum LoopControl {
    Continue { redraw: bool },
    Break { reason: ShutdownReason },
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

pub(crate) struct EditorRuntime<S: Screen> {
    screen: S,
    model: EditorModel,
    registry: CommandRegistry,
    config: Config,
    plugins: PluginHost,
}

impl<S: Screen> EditorRuntime<S> {
    /// The model's view is resized to the screen's text area.
    pub(crate) fn new(
        screen: S,
        mut model: EditorModel,
        registry: CommandRegistry,
        config: Config,
        plugins: PluginHost,
    ) -> Self {
        let (cols, rows) = screen.size();
        let layout = Layout::for_screen(cols, rows);
        model.resize(layout.text.height as usize, layout.text.width as usize);
        Self {
            screen,
            model,
            registry,
            config,
            plugins,
        }
    }

    pub(crate) fn run(&mut self) -> ShutdownReason {
        self.render();

        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter_loop = span.enter();

        let reason = loop {
            let event = match self.screen.poll_event() {
                Ok(ev) => ev,
                Err(e) => {
                    error!(target: "runtime", error = %e, "input_error");
                    break ShutdownReason::InputClosed;
                }
            };
            let redraw = match self.handle_input_event(&event) {
                LoopControl::Break { reason } => break reason,
                LoopControl::Continue { redraw } => redraw,
            };
            let expired = self.model.state_mut().tick_ephemeral();
            if redraw || expired {
                self.render();
            }
        };
        self.finalize_shutdown(reason);
        reason
    }

    fn handle_input_event(&mut self, event: &InputEvent) -> LoopControl {
        let action = match event {
            InputEvent::Resize(cols, rows) => Some(Action::Resize(*cols, *rows)),
            InputEvent::Key(key) => {
                let state = self.model.state();
                translate_key(state.mode, state.prompt.is_some(), key)
            }
        };
        let Some(action) = action else {
            trace!(target: "runtime", ?event, "unmapped_input");
            return LoopControl::Continue { redraw: false };
        };
        let from_ctrl_c = action == Action::Quit;
        let result = dispatch(action, &mut self.model, &self.registry, &mut self.config);
        if result.quit {
            let reason = if from_ctrl_c {
                ShutdownReason::CtrlC
            } else {
                ShutdownReason::CommandQuit
            };
            return LoopControl::Break { reason };
        }
        LoopControl::Continue {
            redraw: result.dirty,
        }
    }

    fn render(&mut self) {
        if let Err(e) = core_render::render(&mut self.screen, &self.model, &self.config.styles) {
            error!(target: "render", error = %e, "render_error");
        }
    }

    fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        for e in self.plugins.shutdown() {
            warn!(target: "runtime.shutdown", plugin = e.plugin(), error = %e, "plugin_cleanup_error");
        }
        log_shutdown_stage(reason, "complete");
    }

    #[cfg(test)]
    pub(crate) fn model(&self) -> &EditorModel {
        &self.model
    }

    #[cfg(test)]
    pub(crate) fn screen(&self) -> &S {
        &self.screen
    }

    #[cfg(test)]
    pub(crate) fn config(&self) -> &Config {
        &self.config
    }
}
