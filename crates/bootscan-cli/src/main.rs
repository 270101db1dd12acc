//! Static boot-sequence analyzer for PX4-style firmware trees.
//!
//! Interprets a board's init scripts without running them and reports which
//! modules would start and how every parameter resolves.
//!
//! # Usage
//!
//! ```bash
//! # Which modules would a raspberrypi/pico board boot?
//! bootscan ~/src/PX4-Autopilot --vendor raspberrypi --model pico
//!
//! # Include a vehicle's airframe scripts
//! bootscan ~/src/PX4-Autopilot --vendor px4 --model fmu-v5 --vehicle 4001
//!
//! # POSIX (SITL-style) init-script layout
//! bootscan ~/src/PX4-Autopilot --vendor px4 --model sitl --posix
//!
//! # Machine-readable report
//! bootscan ./firmware --vendor acme --model falcon --format json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bootscan_core::report::ScanReport;
use bootscan_core::runner::{self, ScanConfig};

/// Predict the modules and parameters a board's boot sequence would
/// activate, without executing it.
#[derive(Parser)]
#[command(name = "bootscan")]
#[command(about = "Statically analyze a flight controller's boot scripts")]
#[command(version)]
struct Cli {
    /// Root of the firmware source tree
    #[arg(env = "BOOTSCAN_FIRMWARE")]
    firmware: PathBuf,

    /// Board vendor directory under boards/
    #[arg(long)]
    vendor: String,

    /// Board model directory under boards/<vendor>/
    #[arg(long)]
    model: String,

    /// Vehicle-family tag selecting airframe scripts (e.g. 4001 or quad_x)
    #[arg(long)]
    vehicle: Option<String>,

    /// Use the POSIX variant of the init-script directory
    #[arg(long)]
    posix: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ScanConfig {
        firmware_dir: cli.firmware,
        posix: cli.posix,
        board_vendor: cli.vendor,
        board_model: cli.model,
        vehicle: cli.vehicle,
    };

    debug!(
        firmware = %config.firmware_dir.display(),
        vendor = %config.board_vendor,
        model = %config.board_model,
        posix = config.posix,
        "scan configuration"
    );

    match runner::run(&config) {
        Ok(report) => {
            render(&report, cli.format);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn render(report: &ScanReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "modules": &report.modules,
                    "params": &report.params,
                })
            );
        }
        OutputFormat::Text => {
            println!("modules: {}", report.modules_csv());
            for (name, value) in &report.params {
                println!("{} = {}", name, value);
            }
        }
    }
}
