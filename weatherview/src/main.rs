//! WeatherView terminal app
//!
//! 1. Key events go to the mounted view (search or result)
//! 2. The view's coordinator/presenter dispatch actions through a `Dispatcher`
//! 3. The reducer updates `AppState` and may return an `Effect`
//! 4. Effects become keyed tasks; their results come back as actions
//! 5. Changed state is published to observers and re-rendered
//!
//! ```sh
//! weatherview                      # start on the search screen
//! weatherview --query Chicago      # search straight away
//! weatherview --forecast --units imperial
//! ```

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use weatherview::api::OpenWeatherClient;
use weatherview::app::WeatherUi;
use weatherview::config::Config;
use weatherview::state::Units;
use weatherview::{keymap, logging, reducer, Action, AppState, Effect};
use weatherview_core::{EffectContext, EffectRuntime, EffectStoreWithMiddleware, LoggingMiddleware};

/// Current weather and 24 hour forecasts from OpenWeatherMap
#[derive(Parser, Debug)]
#[command(name = "weatherview", version)]
struct Args {
    /// City name or 5-digit zip to search for on start
    #[arg(long, short)]
    query: Option<String>,

    /// Start in 24 hour forecast mode
    #[arg(long, short)]
    forecast: bool,

    /// metric or imperial
    #[arg(long, short)]
    units: Option<Units>,

    /// OpenWeatherMap API key (overrides config and OPENWEATHER_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Config file [default: <config dir>/weatherview/config.toml]
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log file [default: <data dir>/weatherview/weatherview.log]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, &args.log_level)?;

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?.with_env();
    if let Some(key) = args.api_key {
        config.api_key = Some(key);
    }
    if let Some(units) = args.units {
        config.units = units;
    }
    config.forecast |= args.forecast;

    let api_key = config.require_api_key(&config_path)?;
    let client = OpenWeatherClient::new(api_key, &config).context("building HTTP client")?;
    tracing::info!(units = ?config.units, base_url = %config.base_url, "Starting");

    // ===== Terminal setup =====
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, client, config, args.query).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exited with error");
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    client: OpenWeatherClient,
    config: Config,
    query: Option<String>,
) -> anyhow::Result<()> {
    let store = EffectStoreWithMiddleware::new(AppState::default(), reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);

    let keys = keymap::keybindings_with(config.keys);
    let ui = WeatherUi::new(runtime.dispatcher(), runtime.observe(), keys)
        .with_forecast_default(config.forecast);
    let ui = RefCell::new(ui);

    if let Some(query) = query {
        ui.borrow_mut().submit_search(&query, runtime.state());
    }

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await?;
    Ok(())
}

/// Handle effects by spawning tasks
fn handle_effect(client: &OpenWeatherClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchWeather { query, seq } => {
            let client = client.clone();
            // Same key: a new search aborts the one in flight
            ctx.tasks().spawn("weather", async move {
                match client.fetch(&query).await {
                    Ok(report) => Action::WeatherDidLoad { seq, report },
                    Err(e) => Action::WeatherDidError {
                        seq,
                        message: e.to_string(),
                    },
                }
            });
        }
    }
}
