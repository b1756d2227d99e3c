//! Weather Workshop - current temperature for a city, in the terminal

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_workshop::action::Action;
use weather_workshop::api::{
    DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL, OpenMeteoClient, OpenMeteoConfig,
};
use weather_workshop::components::{Component, WeatherWidget, WeatherWidgetProps};
use weather_workshop::effect::Effect;
use weather_workshop::reducer::reducer;
use weather_workshop::state::{AppState, DEFAULT_CITY, LOADING_ANIM_TICK_MS};
use weather_workshop::tasks;

/// Weather Workshop - look up the current temperature of any city
#[derive(Parser, Debug)]
#[command(name = "weather-workshop")]
#[command(about = "Type a city, get its current temperature (Open-Meteo)")]
struct Args {
    /// City the form starts with
    #[arg(long, short, env = "WEATHER_CITY", default_value = DEFAULT_CITY)]
    city: String,

    /// Look up the starting city immediately
    #[arg(long)]
    fetch_on_start: bool,

    /// Geocoding API base URL
    #[arg(long, env = "WEATHER_GEOCODING_URL", default_value = DEFAULT_GEOCODING_URL)]
    geocoding_url: String,

    /// Forecast API base URL
    #[arg(long, env = "WEATHER_FORECAST_URL", default_value = DEFAULT_FORECAST_URL)]
    forecast_url: String,

    /// Per-request timeout in seconds (default: none)
    #[arg(long, env = "WEATHER_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Append logs to this file (filtered by RUST_LOG)
    #[arg(long, env = "WEATHER_LOG_FILE", default_value_os_t = default_log_path())]
    log_file: PathBuf,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WorkshopComponentId {
    Widget,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WorkshopContext {
    Main,
}

impl EventRoutingState<WorkshopComponentId, WorkshopContext> for AppState {
    fn focused(&self) -> Option<WorkshopComponentId> {
        Some(WorkshopComponentId::Widget)
    }

    fn modal(&self) -> Option<WorkshopComponentId> {
        None
    }

    fn binding_context(&self, id: WorkshopComponentId) -> WorkshopContext {
        match id {
            WorkshopComponentId::Widget => WorkshopContext::Main,
        }
    }

    fn default_context(&self) -> WorkshopContext {
        WorkshopContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        fetch_on_start,
        geocoding_url,
        forecast_url,
        timeout_secs,
        log_file,
        debug: debug_args,
    } = Args::parse();

    init_logging(&log_file)?;

    let client = OpenMeteoClient::new(OpenMeteoConfig {
        geocoding_base_url: geocoding_url,
        forecast_base_url: forecast_url,
        timeout: timeout_secs.map(Duration::from_secs),
    })
    .map_err(|e| io::Error::other(format!("http client setup failed: {e}")))?;
    info!(config = ?client.config(), "starting");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial_city = city.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(initial_city))
        })
        .await
        .map_err(debug_error)?;

    let initial_action = fetch_on_start.then(|| Action::QuerySubmit(city));
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        initial_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("weather-workshop.log")
}

/// Install a file-backed subscriber; the terminal belongs to the UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("weather_workshop=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(format!("logging setup failed: {e}")))
}

struct WorkshopUi {
    widget: WeatherWidget,
}

impl WorkshopUi {
    fn new() -> Self {
        Self {
            widget: WeatherWidget::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WorkshopComponentId>,
    ) {
        event_ctx.set_component_area(WorkshopComponentId::Widget, area);

        let props = WeatherWidgetProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.widget.render(frame, area, props);
    }

    fn handle_widget_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherWidgetProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .widget
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: OpenMeteoClient,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WorkshopUi::new()));
    let mut bus: EventBus<AppState, Action, WorkshopComponentId, WorkshopContext> =
        EventBus::new();
    let keybindings: Keybindings<WorkshopContext> = Keybindings::new();

    let ui_widget = Rc::clone(&ui);
    bus.register(WorkshopComponentId::Widget, move |event, state| {
        ui_widget
            .borrow_mut()
            .handle_widget_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Spawn each effect under its fixed key; a newer submission replaces the older task.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &OpenMeteoClient) {
    let key = tasks::task_key(&effect);
    ctx.tasks()
        .spawn(TaskKey::new(key), tasks::run(client.clone(), effect));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_defaults_to_temp_dir() {
        let args = Args::try_parse_from(["weather-workshop"]).expect("parse");
        assert_eq!(args.log_file, std::env::temp_dir().join("weather-workshop.log"));
    }

    #[test]
    fn test_log_file_override() {
        let args = Args::try_parse_from(["weather-workshop", "--log-file", "/tmp/wx.log"])
            .expect("parse");
        assert_eq!(args.log_file, PathBuf::from("/tmp/wx.log"));
    }
}
