use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, registry::Registry, EnvFilter};
use url::Url;

use crate::http_client::HttpTransportConfig;

/// Guild service SOAP client (Synchronous)
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// SOAP endpoint of the guild service
    #[arg(
        short,
        long,
        default_value = "http://localhost:8000/soap",
        help = "Guild service SOAP endpoint URL"
    )]
    pub endpoint: String,

    #[arg(long, default_value_t = 30, help = "Connect timeout in seconds")]
    pub connect_timeout: u64,

    #[arg(long, default_value_t = 60, help = "Read timeout in seconds")]
    pub read_timeout: u64,

    /// Verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase logging verbosity")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every guild
    List,
    /// Show one guild
    Get {
        #[arg(allow_negative_numbers = true)]
        guild_id: i64,
    },
    /// Create a guild led by `leader`
    Create {
        name: String,
        description: String,
        leader: String,
    },
    /// Add a character to a guild
    Join {
        #[arg(allow_negative_numbers = true)]
        guild_id: i64,
        character_name: String,
    },
    /// List the members of a guild
    Members {
        #[arg(allow_negative_numbers = true)]
        guild_id: i64,
    },
}

/// Sets up a panic hook so panics end up in the log before the process exits.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("A panic occurred: {}", panic_info);
    }));
}

fn filter_for(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "info,ureq=error",
        1 => "debug,ureq=warn",
        2 => "trace,ureq=info",
        _ => "trace",
    }
}

/// Initialize structured logging on stderr, keeping stdout for results.
///
/// Buffered lines are flushed when the returned guard drops, so hold it until
/// the last log call.
pub fn init_logging(verbose_level: u8) -> anyhow::Result<WorkerGuard> {
    setup_panic_hook();

    // Bridge logs from the `log` crate (ureq) to `tracing`
    LogTracer::init().ok();

    let (nb_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter_for(verbose_level)))
        .with(
            fmt::layer()
                .with_writer(nb_writer)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .compact(),
        );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!("Logging system initialized.");

    Ok(guard)
}

/// Create transport configuration from command line arguments
pub fn create_transport_config(args: &Args) -> anyhow::Result<HttpTransportConfig> {
    let endpoint = Url::parse(&args.endpoint)
        .with_context(|| format!("invalid endpoint URL '{}'", args.endpoint))?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        anyhow::bail!("endpoint must use http or https, got '{}'", endpoint.scheme());
    }

    Ok(HttpTransportConfig::builder()
        .endpoint(endpoint)
        .connect_timeout(Duration::from_secs(args.connect_timeout))
        .read_timeout(Duration::from_secs(args.read_timeout))
        .build())
}
