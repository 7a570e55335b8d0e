use apishift::cli::commands::CliArgs;
use apishift::cli::handle_migrate;
use apishift::util::init_logging;
use apishift::{ShiftConfig, NAME, VERSION};

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio::io::AsyncReadExt;
use tracing::{debug, error};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = args.apply_to(ShiftConfig::default());
    init_logging(config.logging_config());

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let source_code = match read_stdin().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let exit_code = handle_migrate(&args, &config, &source_code).await;
    process::exit(exit_code);
}

async fn read_stdin() -> Result<String> {
    let mut source = String::new();
    tokio::io::stdin()
        .read_to_string(&mut source)
        .await
        .context("Failed to read code from stdin")?;
    debug!("Read {} bytes from stdin", source.len());
    Ok(source)
}
