// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, read configuration, build the
//   controller and hand it to the UI loop.

use anyhow::Context;
use shortlink_cli::api::ApiClient;
use shortlink_cli::config::Config;
use shortlink_cli::controller::Controller;
use shortlink_cli::host::TerminalHost;
use shortlink_cli::ui::main_menu;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; `SHORTLINK_LOG=debug` shows every request.
    let filter =
        EnvFilter::try_from_env("SHORTLINK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let api = ApiClient::new(&config)?;
    tracing::info!(base_url = api.base_url(), "using link service");

    let controller = Controller::new(api, TerminalHost, config.copy_feedback);
    main_menu(controller)?;
    Ok(())
}
