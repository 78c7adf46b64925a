use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mrss::app::{AppContext, MrssError};
use mrss::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("mrss: {:#}", e);
            let code = e.downcast_ref::<MrssError>().map_or(2, MrssError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let ctx = AppContext::load().context("Failed to load configuration")?;
    mrss::tui::run(ctx).await?;
    Ok(())
}

/// Log to a file; stdout belongs to the UI. Set `RUST_LOG` to enable.
fn init_tracing() {
    let Some(path) = AppContext::log_path() else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::from_default_env())
        .init();
}
