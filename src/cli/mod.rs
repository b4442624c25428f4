use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod config;
pub mod demo;
pub mod integrations;
pub mod verify;
pub mod version;

use config::AttestConfig;

#[derive(Parser)]
#[command(name = "attest")]
#[command(author = "Attest Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wallet ownership attestation via challenge signing", long_about = None)]
pub struct Cli {
    /// Path to config file (defaults to <config_dir>/attest/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List known wallet integrations and their detection status
    Integrations,

    /// Run the full connect -> sign -> verify -> disconnect flow against an
    /// in-process signing agent
    Demo {
        /// Message to sign
        #[arg(long, default_value = "attest demo challenge")]
        message: String,

        /// Integration slot to stage the in-process agent under
        #[arg(long)]
        integration: Option<String>,
    },

    /// Verify a detached Ed25519 signature produced elsewhere
    Verify {
        /// The signed message text
        #[arg(long)]
        message: String,

        /// Signature as 128 hex characters (64 bytes)
        #[arg(long)]
        signature: String,

        /// Public key as 64 hex characters (32 bytes)
        #[arg(long)]
        public_key: String,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

/// Initialize logging from config, honoring `RUST_LOG` when set.
fn init_logging(config: &AttestConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AttestConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config)?;

    match cli.command {
        Commands::Integrations => integrations::execute().await,
        Commands::Demo {
            message,
            integration,
        } => {
            let integration = integration.unwrap_or(config.wallet.integration);
            demo::execute(&integration, &message).await
        }
        Commands::Verify {
            message,
            signature,
            public_key,
        } => verify::execute(&message, &signature, &public_key).await,
        Commands::Init { force } => {
            let path = cli
                .config
                .unwrap_or_else(config::default_config_path);
            if path.exists() && !force {
                return Err(format!(
                    "Config file already exists at '{}' (use --force to overwrite)",
                    path.display()
                )
                .into());
            }
            AttestConfig::create_default(&path)?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_integrations() {
        let cli = Cli::try_parse_from(["attest", "integrations"]).unwrap();
        assert!(matches!(cli.command, Commands::Integrations));
    }

    #[test]
    fn test_cli_parses_demo_with_message() {
        let cli = Cli::try_parse_from(["attest", "demo", "--message", "hello"]).unwrap();
        match cli.command {
            Commands::Demo {
                message,
                integration,
            } => {
                assert_eq!(message, "hello");
                assert!(integration.is_none());
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_parses_verify() {
        let cli = Cli::try_parse_from([
            "attest",
            "verify",
            "--message",
            "hello",
            "--signature",
            "ab",
            "--public-key",
            "cd",
        ])
        .unwrap();
        match cli.command {
            Commands::Verify {
                message,
                signature,
                public_key,
            } => {
                assert_eq!(message, "hello");
                assert_eq!(signature, "ab");
                assert_eq!(public_key, "cd");
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli =
            Cli::try_parse_from(["attest", "--config", "/tmp/custom.toml", "version"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/custom.toml")));
    }
}
