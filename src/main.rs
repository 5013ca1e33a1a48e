use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ftc_teleop_runtime::config::TeleopConfig;

/// Teleop drive runtime: gamepad snapshots in, mecanum wheel powers out
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured speed factor
    #[arg(short, long)]
    speed_factor: Option<f32>,

    /// Drive from gamepad 1 only
    #[arg(long)]
    single: bool,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init(); // installs the subscriber globally

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match TeleopConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(1);
            }
        },
        None => TeleopConfig::default(),
    };
    if let Some(speed_factor) = args.speed_factor {
        config.speed_factor = speed_factor;
    }
    if args.single {
        config.policy.secondary.enabled = false;
    }

    if let Err(e) = ftc_teleop_runtime::runtime::run(config).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
