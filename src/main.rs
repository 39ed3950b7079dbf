use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use vitals::app::App;
use vitals::config::{Config, load_config, load_config_from_path};
use vitals::diagnostics;
use vitals::event::{Event, EventHandler};
use vitals::ui;

#[derive(Parser)]
#[command(
    name = "vitals",
    about = "Live terminal dashboard for host resource usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Performance log file, appended to on every tick
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write JSON-lines diagnostics to this file
    #[arg(long)]
    trace_log: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &config.logging.trace_log {
        diagnostics::init_tracing_json(path)?;
    }
    tracing::info!(
        refresh_rate_ms = config.general.refresh_rate_ms,
        log_file = %config.logging.log_file.display(),
        "starting dashboard"
    );

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &config).await;

    ratatui::restore();
    tracing::info!("dashboard stopped");

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(config.tick_rate());

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    true
                } else {
                    false
                }
            }
            Event::Tick => {
                app.tick(Instant::now());
                true
            }
            Event::Resize => true,
            Event::Interrupt => {
                app.running = false;
                false
            }
        };
        if should_draw && app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref path) = cli.log_file {
        config.logging.log_file = path.clone();
    }
    if let Some(ref path) = cli.trace_log {
        config.logging.trace_log = Some(path.clone());
    }

    config
}
