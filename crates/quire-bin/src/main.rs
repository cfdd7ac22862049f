//! Quire entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::io_ops::read_file;
use core_actions::{CommandError, CommandRegistry, register_builtins};
use core_config::{Config, load_from, load_or_init};
use core_model::EditorModel;
use core_plugin::{PluginHost, PluginLoader};
use core_state::{EPHEMERAL_TTL, EditorState};
use core_terminal::{CrosstermBackend, CrosstermScreen, TerminalBackend};
use core_text::Document;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod plugins;
mod runtime;

use runtime::EditorRuntime;

const LOG_FILE: &str = "quire.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quire", version, about = "Quire modal text editor")]
struct Args {
    /// File to open at startup. A path that does not exist yet starts an
    /// empty document that saves there.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `quire.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Start without the bundled plugins.
    #[arg(long = "no-plugins")]
    pub no_plugins: bool,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Load styles, creating the file on first run. A config that cannot be
/// written still yields usable defaults.
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match load_or_init(path.clone()) {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(target: "config", error = %e, "config_init_failed");
            load_from(path)
        }
    }
}

fn load_document(path: Option<&Path>) -> EditorState {
    let mut state = EditorState::new(Document::new());
    let Some(path) = path else {
        return state;
    };
    match read_file(path) {
        Ok(file) => {
            info!(target: "io", path = %path.display(), lines = file.document.line_count(), "startup_file_opened");
            state.replace_document(
                file.document,
                file.path,
                file.line_ending,
                file.had_trailing_newline,
            );
        }
        Err(CommandError::Io { ref source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            state.file_name = Some(path.to_path_buf());
            state.set_ephemeral(format!("New file: {}", path.display()), EPHEMERAL_TTL);
        }
        Err(e) => {
            error!(target: "io", path = %path.display(), error = %e, "startup_open_failed");
            state.set_error(e.to_string(), EPHEMERAL_TTL);
        }
    }
    state
}

/// Run the plugin load pass. Failures are reported on the status bar and
/// otherwise ignored.
fn load_plugins(
    loader: Option<&mut dyn PluginLoader>,
    registry: &mut CommandRegistry,
    state: &mut EditorState,
) -> PluginHost {
    let mut host = PluginHost::new();
    let Some(loader) = loader else {
        info!(target: "plugin.host", "plugins_disabled");
        return host;
    };
    let report = host.load_all(loader, registry);
    if let Some(first) = report.failed.first() {
        state.set_error(first.to_string(), EPHEMERAL_TTL);
    }
    host
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

    let config = load_config(args.config.clone())?;
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    let mut state = load_document(args.path.as_deref());
    let mut bundled = plugins::bundled_plugins();
    let loader: Option<&mut dyn PluginLoader> = if args.no_plugins {
        None
    } else {
        Some(&mut bundled)
    };
    let plugins = load_plugins(loader, &mut registry, &mut state);
    info!(
        target: "runtime.startup",
        path = ?args.path,
        config = ?config.path(),
        commands = registry.len(),
        plugins = plugins.len(),
        "bootstrap_complete"
    );

    startup.backend.set_title("Quire")?;
    let guard = startup.backend.enter_guard()?;
    let screen = CrosstermScreen::new()?;
    let model = EditorModel::new(state, 0, 0);
    let mut runtime = EditorRuntime::new(screen, model, registry, config, plugins);
    let reason = runtime.run();
    guard.finish()?;
    info!(target: "runtime", %reason, "exit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ShutdownReason;
    use core_actions::Command;
    use core_config::{Color, StyleSet};
    use core_events::{InputEvent, KeyCode, KeyEvent};
    use core_plugin::{HostContext, Plugin, PluginError, StaticLoader};
    use core_state::{MessageKind, Mode};
    use core_terminal::MemoryScreen;
    use pretty_assertions::assert_eq;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing::dispatcher::Dispatch;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::registry::Registry;

    #[derive(Clone, Default)]
    struct Capture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    #[derive(Clone, Debug)]
    struct CapturedEvent {
        target: String,
        fields: Vec<(String, String)>,
    }

    impl CapturedEvent {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        }
    }

    #[derive(Default)]
    struct FieldCollector {
        fields: Vec<(String, String)>,
    }

    impl Visit for FieldCollector {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    impl<S> Layer<S> for Capture
    where
        S: Subscriber,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut collector = FieldCollector::default();
            event.record(&mut collector);
            let meta = event.metadata();
            self.events.lock().unwrap().push(CapturedEvent {
                target: meta.target().to_string(),
                fields: collector.fields,
            });
        }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::char(c))
    }

    fn press(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(code))
    }

    fn typed(text: &str) -> Vec<InputEvent> {
        text.chars().map(key).collect()
    }

    fn ctrl_c() -> InputEvent {
        InputEvent::Key(KeyEvent::ctrl(KeyCode::Char('c')))
    }

    fn runtime(
        lines: &[&str],
        events: Vec<InputEvent>,
        config: Config,
    ) -> EditorRuntime<MemoryScreen> {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        let mut state = EditorState::new(Document::from_lines(lines.iter().copied()));
        let mut loader = plugins::bundled_plugins();
        let host = load_plugins(Some(&mut loader), &mut registry, &mut state);
        let screen = MemoryScreen::new(40, 8).with_events(events);
        EditorRuntime::new(screen, EditorModel::new(state, 0, 0), registry, config, host)
    }

    fn in_memory() -> Config {
        Config::in_memory(StyleSet::default())
    }

    #[test]
    fn type_text_then_ctrl_c() {
        let mut events = typed("w");
        events.push(press(KeyCode::Enter));
        events.extend(typed("hi"));
        events.push(press(KeyCode::Esc));
        events.push(ctrl_c());
        let mut rt = runtime(&[""], events, in_memory());
        assert_eq!(rt.run(), ShutdownReason::CtrlC);
        assert_eq!(rt.model().state().document.lines(), vec!["hi"]);
        assert_eq!(rt.model().state().mode, Mode::Command);
        assert!(rt.screen().row_text(0).starts_with("  1hi"));
        assert!(rt.screen().row_text(7).starts_with("[COMMAND] [No Name]*"));
    }

    #[test]
    fn quit_command_ends_loop() {
        let mut events = typed("quit");
        events.push(press(KeyCode::Enter));
        events.push(key('x')); // never read
        let mut rt = runtime(&["a"], events, in_memory());
        assert_eq!(rt.run(), ShutdownReason::CommandQuit);
        assert_eq!(rt.screen().pending_events(), 1);
    }

    #[test]
    fn exhausted_input_stops_loop() {
        let mut rt = runtime(&["a"], typed("wc"), in_memory());
        assert_eq!(rt.run(), ShutdownReason::InputClosed);
        assert_eq!(rt.model().state().command_line.buffer(), "wc");
    }

    #[test]
    fn plugin_command_runs_through_the_loop() {
        let mut events = typed("wc");
        events.push(press(KeyCode::Enter));
        events.extend(typed("g 3"));
        events.push(press(KeyCode::Enter));
        events.push(ctrl_c());
        let mut rt = runtime(&["one", "two words", "three"], events, in_memory());
        rt.run();
        let msg = rt.model().state().ephemeral_status.as_ref().unwrap();
        assert_eq!(msg.text, "3 lines, 4 words, 17 chars");
        assert_eq!(rt.model().cursor().line, 2);
        assert_eq!(rt.screen().cursor(), Some((3, 2)));
    }

    #[test]
    fn resize_updates_the_view() {
        let events = vec![InputEvent::Resize(30, 6), ctrl_c()];
        let mut rt = runtime(&["a"], events, in_memory());
        assert_eq!(rt.model().view().rows(), 7);
        rt.run();
        assert_eq!(rt.model().view().rows(), 5);
        assert_eq!(rt.model().view().cols(), 27);
        assert!(rt.screen().row_text(5).starts_with("[COMMAND]"));
    }

    #[test]
    fn settings_commit_persists_styles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        let config = load_config(Some(path.clone())).unwrap();
        assert!(path.exists());
        let mut events = typed("settings");
        events.push(press(KeyCode::Enter));
        events.push(press(KeyCode::Down));
        events.push(press(KeyCode::Right));
        events.push(press(KeyCode::Enter));
        events.push(ctrl_c());
        let mut rt = runtime(&["a"], events, config);
        rt.run();
        assert_eq!(rt.config().styles.main.bg, Color::DarkGrey);
        let reloaded = load_from(Some(path)).unwrap();
        assert_eq!(reloaded.styles.main.bg, Color::DarkGrey);
    }

    #[test]
    fn missing_startup_file_binds_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let state = load_document(Some(&path));
        assert_eq!(state.file_name.as_deref(), Some(path.as_path()));
        assert_eq!(state.document.lines(), vec![""]);
        assert!(!state.dirty);
        assert_eq!(
            state.ephemeral_status.as_ref().map(|m| m.kind),
            Some(MessageKind::Info)
        );
    }

    #[test]
    fn existing_startup_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "x\ny\n").unwrap();
        let state = load_document(Some(&path));
        assert_eq!(state.document.lines(), vec!["x", "y"]);
        assert!(state.had_trailing_newline);
        assert!(state.ephemeral_status.is_none());
    }

    struct Sticky;

    impl Plugin for Sticky {
        fn name(&self) -> &str {
            "sticky"
        }
        fn commands(&self) -> Vec<Command> {
            Vec::new()
        }
        fn initialize(&mut self, _ctx: &mut HostContext<'_>) -> Result<(), PluginError> {
            Ok(())
        }
        fn cleanup(&mut self) -> Result<(), PluginError> {
            Err(PluginError::cleanup("sticky", "handle still open"))
        }
    }

    struct Broken;

    impl Plugin for Broken {
        fn name(&self) -> &str {
            "broken"
        }
        fn commands(&self) -> Vec<Command> {
            Vec::new()
        }
        fn initialize(&mut self, _ctx: &mut HostContext<'_>) -> Result<(), PluginError> {
            Err(PluginError::init("broken", "missing dependency"))
        }
        fn cleanup(&mut self) -> Result<(), PluginError> {
            Ok(())
        }
    }

    #[test]
    fn plugin_init_failure_is_shown_and_skipped() {
        let mut registry = CommandRegistry::new();
        let mut state = EditorState::new(Document::new());
        let mut loader = StaticLoader::new()
            .with(|| Box::new(Broken))
            .with(|| Box::new(plugins::StatsPlugin::default()));
        let host = load_plugins(Some(&mut loader), &mut registry, &mut state);
        assert_eq!(host.names(), vec!["stats"]);
        let msg = state.ephemeral_status.as_ref().unwrap();
        assert_eq!(msg.kind, MessageKind::Error);
        assert!(msg.text.contains("broken"));
    }

    #[test]
    fn disabled_plugins_leave_only_builtins() {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        let mut state = EditorState::new(Document::new());
        let host = load_plugins(None, &mut registry, &mut state);
        assert!(host.is_empty());
        assert!(!registry.contains("wc"));
    }

    #[test]
    fn shutdown_logs_plugin_cleanup_errors() {
        let capture = Capture::default();
        let events = capture.events.clone();
        let dispatcher = Dispatch::new(Registry::default().with(capture));

        tracing::dispatcher::with_default(&dispatcher, || {
            let mut registry = CommandRegistry::new();
            let mut state = EditorState::new(Document::new());
            let mut loader = StaticLoader::new().with(|| Box::new(Sticky));
            let host = load_plugins(Some(&mut loader), &mut registry, &mut state);
            let screen = MemoryScreen::new(20, 4).with_events(vec![ctrl_c()]);
            let mut rt = EditorRuntime::new(
                screen,
                EditorModel::new(state, 0, 0),
                registry,
                in_memory(),
                host,
            );
            assert_eq!(rt.run(), ShutdownReason::CtrlC);
        });

        let events = events.lock().unwrap();
        let cleanup = events
            .iter()
            .find(|e| e.target == "runtime.shutdown" && e.field("plugin").is_some())
            .expect("missing plugin cleanup event");
        assert!(cleanup.field("error").unwrap_or_default().contains("handle still open"));
        let stages: Vec<&str> = events
            .iter()
            .filter(|e| e.target == "runtime.shutdown")
            .filter_map(|e| e.field("stage"))
            .collect();
        assert_eq!(stages, vec!["\"begin\"", "\"complete\""]);
    }
}
