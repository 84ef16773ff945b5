use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info};

use fee_ui::{
    FormEvent, app, logging,
    script::{self, HELP},
    settings::Settings,
    tui,
    view::render_text,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Vehicle auction fee calculator.
///
/// On a terminal this opens an interactive form. Otherwise it reads form
/// edits from stdin (`price <amount>`, `type <Common|Luxury>`, `quit`) and
/// prints the fee panel after every change.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML settings file; flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the fee API; `/calculate` is appended.
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log filter (e.g. `debug` or `warn,fee_ui=debug`).
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Initial base price.
    #[arg(long)]
    price: Option<String>,

    /// Initial vehicle type.
    #[arg(long)]
    vehicle_type: Option<String>,

    /// Calculate once from `--price`/`--vehicle-type`, print, and exit.
    #[arg(long)]
    once: bool,

    /// Read line commands from stdin even when attached to a terminal.
    #[arg(long)]
    script: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.overlay(cli.settings());

    logging::init_logging(settings.log_level.as_deref());
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }

    let client_config = settings.client_config();
    debug!(?client_config, "resolved client configuration");
    let mut controller = app::build_controller(&client_config)?;

    if let Some(vehicle_type) = &cli.vehicle_type {
        controller.handle(FormEvent::VehicleTypeInput(vehicle_type.clone()));
    }
    if let Some(price) = &cli.price {
        controller.handle(FormEvent::BasePriceInput(price.clone()));
    }

    if cli.once {
        controller.settle().await;
        print!("{}", render_text(controller.form()));
        return match controller.form().error_message() {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(()),
        };
    }

    info!(api = %client_config.base_url, "fee calculator ready");
    let interactive = !cli.script && io::stdin().is_terminal() && io::stdout().is_terminal();
    if interactive {
        return tui::run(&mut controller).await;
    }

    println!("{HELP}");
    print!("{}", render_text(controller.form()));
    let stdin = BufReader::new(tokio::io::stdin());
    script::run_script(&mut controller, stdin, &mut io::stdout()).await
}
