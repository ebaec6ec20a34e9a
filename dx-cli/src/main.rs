use dx_cli::cli::Cli;
use dx_cli::logging;
use dx_cli::module::handler::{ConditionsHandler, Outcome};
use dx_cli::module::watch::{WatchConfig, WatchMode};

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.load_config()?;
    logging::init_logging(cli.log_level(&config));

    let settings = cli.into_settings(&config)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let handler = ConditionsHandler::new(settings)?;

    if !handler.settings().watch {
        let outcome = handler.handle_once().await?;
        if let Outcome::Report(text) = &outcome {
            println!("{}", text);
        }
        return Ok(outcome.exit_code());
    }

    if handler.settings().alert.is_some() {
        tracing::warn!("--alert is ignored in watch mode");
    }

    let mut watch = WatchMode::new(WatchConfig::new(handler.settings().interval));
    let handler = &handler;
    let mut stdout = std::io::stdout();

    watch
        .run(move |_| handler.render_once(), shutdown_signal(), &mut stdout)
        .await?;

    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
