// SPDX-License-Identifier: GPL-3.0-or-later
mod args;

use std::io::Write;

use anyhow::{Context, Result};
use args::{Cli, Command};
use clap::Parser;
use subdb_client::SubDbClient;
use subdb_config::{load as load_config, AppConfig};
use subdb_fingerprint::fingerprint_file;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    // The filter level comes from the config, so the load is reported once
    // the subscriber is in place.
    init_tracing(&config.telemetry.log_level);
    info!(target: "cli", config_file = ?cli.config, "configuration loaded");

    run(cli.command, &config).await
}

/// Execute one subcommand. Only the network commands build a client.
async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Hash { file } => {
            let hash = fingerprint_file(&file)
                .with_context(|| format!("hashing {}", file.display()))?;
            println!("{hash}");
        }

        Command::Languages => {
            let client = build_client(config)?;
            for language in client.languages().await? {
                println!("{language}");
            }
        }

        Command::Search { file } => {
            let client = build_client(config)?;
            for language in client.search(&file).await? {
                println!("{language}");
            }
        }

        Command::Download {
            file,
            language,
            output,
        } => {
            let client = build_client(config)?;
            let subtitle = client.download(&file, &language).await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, subtitle)
                        .await
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(target: "cli", "subtitle written to {}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&subtitle)?;
                    stdout.flush()?;
                }
            }
        }

        Command::Upload { file, subtitle } => {
            let client = build_client(config)?;
            client.upload(&file, &subtitle).await?;
            println!("Uploaded {}", subtitle.display());
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(config: &AppConfig) -> Result<SubDbClient> {
    let mut builder = SubDbClient::builder()
        .read_base_url(&config.endpoints.read_base_url)
        .upload_base_url(&config.endpoints.upload_base_url)
        .read_timeout(config.http.read_timeout());

    if let Some(timeout) = config.http.upload_timeout() {
        builder = builder.upload_timeout(timeout);
    }

    if let Some((name, version, url)) = config.identity.parts() {
        builder = builder.user_agent(name, version, url);
    }

    Ok(builder.build()?)
}
