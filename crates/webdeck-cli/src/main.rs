//! webdeck CLI — headless operator tool for the webdeck core.
//!
//! Probes sites for usable icons and encrypts/decrypts service
//! credentials with the same code paths the dashboard uses. Absences are
//! results, not errors: a site with no discoverable icon and a credential
//! that no longer decrypts both exit 0 with an explicit message.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use webdeck_favicon::normalize::extract_host;
use webdeck_favicon::resolver::FaviconResolver;
use webdeck_vault::cipher::SecretCipher;

use crate::config::Config;

/// webdeck — dashboard tooling for self-hosted services.
#[derive(Parser)]
#[command(
    name = "webdeck",
    version,
    about = "webdeck CLI — resolve service icons and manage encrypted credentials",
    long_about = None,
    after_help = "Environment variables:\n  \
        WEBDECK_SECRET_KEY        Application secret (required for `secret` commands)\n  \
        WEBDECK_CREDENTIALS_KEY   Dedicated credential secret (overrides the app secret)\n  \
        WEBDECK_FAVICON_TIMEOUT   Per-request probe timeout in seconds (default: 4)\n  \
        WEBDECK_LOG_LEVEL         Log filter when RUST_LOG is unset (default: warn)",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a usable icon URL for a site.
    Favicon {
        /// Site URL or bare host ("nas.local:5000" works).
        url: String,
        /// Per-request timeout in seconds (overrides the environment).
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print the host[:port] component of a URL or host string.
    Host {
        /// URL or host string.
        value: String,
    },
    /// Encrypt or decrypt a service credential.
    Secret {
        #[command(subcommand)]
        action: SecretCommands,
    },
}

#[derive(Subcommand)]
enum SecretCommands {
    /// Encrypt a plaintext credential for storage.
    Encrypt {
        /// The plaintext credential.
        value: String,
    },
    /// Decrypt a stored credential.
    Decrypt {
        /// The ciphertext produced by `secret encrypt`.
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(&config.log_level);

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Favicon { url, timeout } => {
            let timeout = Duration::from_secs(timeout.unwrap_or(config.favicon_timeout_secs));
            let resolver = FaviconResolver::new(timeout).context("building HTTP client")?;
            match resolver.resolve(&url).await {
                Some(icon) => println!("{icon}"),
                None => println!("no icon found"),
            }
        }
        Commands::Host { value } => {
            println!("{}", extract_host(&value));
        }
        Commands::Secret { action } => {
            let secret = config.credentials_secret().context(
                "no secret configured: set WEBDECK_SECRET_KEY or WEBDECK_CREDENTIALS_KEY",
            )?;
            let cipher = SecretCipher::from_secret(secret);
            match action {
                SecretCommands::Encrypt { value } => match cipher.encrypt(&value) {
                    Some(ciphertext) => println!("{ciphertext}"),
                    None => println!("nothing to encrypt"),
                },
                SecretCommands::Decrypt { value } => match cipher.decrypt(&value) {
                    Some(plaintext) => println!("{plaintext}"),
                    None => println!("no recoverable secret"),
                },
            }
        }
    }
    Ok(())
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}
