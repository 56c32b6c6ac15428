//! Minitel server entry point.
//!
//! ```text
//! minitel-server [--config minitel.toml] [--bind ADDR] [--port PORT] [COMMAND]
//!
//!   serve    accept terminals over TCP (default)
//!   serial   probe the serial ports and serve the terminal found there
//!   export   write the welcome page as .VDT files
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use minitel_server::config::{load_config, ServerConfig};
use minitel_server::{export, serve, welcome};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Serves Videotex pages to Minitel terminals.
#[derive(Debug, Parser)]
#[command(name = "minitel-server", version)]
struct Cli {
    /// Configuration file.  Defaults apply when it does not exist.
    #[arg(long, default_value = "minitel.toml", env = "MINITEL_CONFIG")]
    config: PathBuf,

    /// Address to listen on, overriding `[server] bind_address`.
    #[arg(long, env = "MINITEL_BIND")]
    bind: Option<String>,

    /// TCP port, overriding `[server] port`.
    #[arg(long, env = "MINITEL_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Accept terminals over TCP.
    Serve,
    /// Probe serial ports and serve the first terminal that answers.
    Serial {
        /// Device to use instead of probing every /dev/tty* port.
        #[arg(long)]
        device: Option<PathBuf>,
    },
    /// Write the welcome page as <NAME>_VGP2_.VDT and <NAME>_VGP5_.VDT.
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, default_value = "welcome")]
        name: String,
    },
}

impl Cli {
    /// Applies the command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(Command::Serial {
            device: Some(device),
        }) = &self.command
        {
            config.serial.port = Some(device.clone());
        }
    }
}

fn listen_addr(config: &ServerConfig) -> anyhow::Result<SocketAddr> {
    let text = format!("{}:{}", config.server.bind_address, config.server.port);
    text.parse()
        .with_context(|| format!("invalid listen address: '{text}'"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    cli.apply(&mut config);

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the configured level applies.
    let level = config.server.log_level.clone();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
        }
    });

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let addr = listen_addr(&config)?;
            serve::run_server(addr, config.terminal, running).await?;
        }
        Command::Serial { .. } => run_serial(config, running).await?,
        Command::Export { dir, name } => {
            let page = welcome::page(None).context("failed to build the welcome page")?;
            for path in export::write_files(&page, &dir, &name)? {
                println!("{}", path.display());
            }
        }
    }

    info!("minitel-server stopped");
    Ok(())
}

#[cfg(unix)]
async fn run_serial(config: ServerConfig, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    use minitel_server::probe::probe_serial;

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut minitel = probe_serial(&config.serial, &config.terminal)?;
        let page = welcome::page(None).context("failed to build the welcome page")?;
        serve::run_terminal(&mut minitel, &page, &running)?;
        minitel.close();
        Ok(())
    })
    .await
    .context("serial session task panicked")?
}

#[cfg(not(unix))]
async fn run_serial(_config: ServerConfig, _running: Arc<AtomicBool>) -> anyhow::Result<()> {
    anyhow::bail!("serial terminals are only supported on Unix")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["minitel-server"]);

        assert_eq!(cli.config, PathBuf::from("minitel.toml"));
        assert!(cli.bind.is_none());
        assert!(cli.port.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_overrides_config_file_values() {
        // Arrange
        let cli = Cli::parse_from(["minitel-server", "--bind", "127.0.0.1", "--port", "8023"]);
        let mut config = ServerConfig::default();

        // Act
        cli.apply(&mut config);

        // Assert
        assert_eq!(listen_addr(&config).unwrap(), "127.0.0.1:8023".parse().unwrap());
    }

    #[test]
    fn test_serial_device_overrides_probing() {
        let cli = Cli::parse_from(["minitel-server", "serial", "--device", "/dev/ttyUSB1"]);
        let mut config = ServerConfig::default();

        cli.apply(&mut config);

        assert_eq!(config.serial.port, Some(PathBuf::from("/dev/ttyUSB1")));
    }

    #[test]
    fn test_export_subcommand_defaults() {
        let cli = Cli::parse_from(["minitel-server", "export"]);

        assert_eq!(
            cli.command,
            Some(Command::Export {
                dir: PathBuf::from("."),
                name: "welcome".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_bind_address_is_reported() {
        let mut config = ServerConfig::default();
        config.server.bind_address = "not-an-ip".to_string();

        assert!(listen_addr(&config).is_err());
    }
}
