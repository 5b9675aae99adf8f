//! Healthprobe: a container healthcheck probe.
//!
//! This is the probe entry point. It initializes tracing, loads configuration
//! from the environment with CLI overrides, performs a single HTTP GET against
//! the configured endpoint, and exits 0 (healthy) or 1 (unhealthy). SIGTERM
//! and SIGINT interrupt the probe at any point and force a clean exit 0.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthprobe::config::{ProbeConfig, DEFAULT_LOG_FILTER};
use healthprobe::report::{self, EXIT_HEALTHY, EXIT_UNHEALTHY};
use healthprobe::{probe, shutdown};

/// Healthprobe: a container HTTP healthcheck probe
#[derive(Parser, Debug)]
#[command(name = "healthprobe", version, about)]
struct Args {
    /// Target host (overrides HEALTH_CHECK_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Target port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Request path (overrides HEALTH_CHECK_PATH)
    #[arg(long)]
    path: Option<String>,

    /// Request timeout in milliseconds (overrides HEALTH_CHECK_TIMEOUT)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level filter (e.g., "healthprobe=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default. The fmt layer
    // writes to stderr so stdout carries only the diagnostic contract lines.
    let log_filter = args
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = match ProbeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[HEALTHCHECK] ❌ Configuration error: {err}");
            std::process::exit(EXIT_UNHEALTHY);
        }
    };

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = args.path {
        config.path = path;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    println!(
        "[HEALTHCHECK] Checking health at {}:{}{}",
        config.host, config.port, config.path
    );

    // A signal arriving mid-request overrides whatever classification was in
    // progress; the probe future is dropped without waiting for it to settle.
    tokio::select! {
        signal = shutdown::shutdown_signal() => {
            println!("[HEALTHCHECK] Received {signal}, shutting down");
            std::process::exit(EXIT_HEALTHY);
        }
        code = run_probe(&config) => {
            std::process::exit(code);
        }
    }
}

/// Run the single probe request and return the process exit code.
async fn run_probe(config: &ProbeConfig) -> i32 {
    let client = match probe::build_client(config) {
        Ok(client) => client,
        Err(err) => {
            report::print_error(&err);
            return EXIT_UNHEALTHY;
        }
    };

    let outcome = match probe::run(&client, config).await {
        Ok(response) => report::classify(response),
        Err(err) => Err(err),
    };

    match &outcome {
        Ok(health) => report::print_report(health),
        Err(err) => report::print_error(err),
    }

    report::exit_code(&outcome)
}
