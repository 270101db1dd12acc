//! Orchestrates which scripts are interpreted, in which order.
//!
//! A scan walks three fixed phases against one accumulator pair: the board's
//! own init scripts, the general boot script, then the airframe scripts
//! selected by the vehicle tag. Writes made in an earlier phase are visible
//! to every later condition, exactly as they would be on target hardware.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::ScanError;
use crate::interpreter::Interpreter;
use crate::locator::{self, SHELL_MARKER};
use crate::report::ScanReport;

/// The general boot script interpreted between board init and airframes.
const BOOT_SCRIPT: &str = "rcS";

/// Caller-supplied configuration of one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the firmware source tree.
    pub firmware_dir: PathBuf,
    /// Select the POSIX variant of the common init-script directory.
    pub posix: bool,
    /// Board vendor directory name under `boards/`.
    pub board_vendor: String,
    /// Board model directory name under `boards/<vendor>/`.
    pub board_model: String,
    /// Vehicle-family tag selecting airframe scripts; `None` skips that
    /// phase.
    pub vehicle: Option<String>,
}

impl ScanConfig {
    /// The common init-script directory, `.posix`-suffixed when configured
    /// for a POSIX build.
    pub fn init_dir(&self) -> PathBuf {
        let name = if self.posix { "init.d.posix" } else { "init.d" };
        self.firmware_dir
            .join("ROMFS")
            .join("px4fmu_common")
            .join(name)
    }

    /// `boards/<vendor>/<model>/init`.
    pub fn board_init_dir(&self) -> PathBuf {
        self.firmware_dir
            .join("boards")
            .join(&self.board_vendor)
            .join(&self.board_model)
            .join("init")
    }
}

/// Run a full scan and return the accumulated report.
///
/// Missing or unreadable root targets (the board init directory, the boot
/// script, the airframes directory when a vehicle is configured) surface as
/// I/O errors; everything optional further down is handled by the
/// interpreter's own policies.
pub fn run(config: &ScanConfig) -> Result<ScanReport, ScanError> {
    let init_dir = config.init_dir();
    let mut interpreter = Interpreter::new(&init_dir);
    let mut report = ScanReport::new();

    let board_dir = config.board_init_dir();
    let board_scripts = locator::find_scripts(&board_dir, SHELL_MARKER)?;
    info!(
        dir = %board_dir.display(),
        count = board_scripts.len(),
        "phase 1: board init scripts"
    );
    for script in &board_scripts {
        interpreter.run_file(script, &mut report)?;
    }

    let boot_script = init_dir.join(BOOT_SCRIPT);
    info!(script = %boot_script.display(), "phase 2: boot script");
    interpreter.run_file(&boot_script, &mut report)?;

    if let Some(vehicle) = config.vehicle.as_deref().filter(|v| !v.is_empty()) {
        let airframes_dir = init_dir.join("airframes");
        let airframes = locator::find_scripts(&airframes_dir, SHELL_MARKER)?;
        let mut matched = 0usize;
        for script in &airframes {
            let name = script
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if name.contains(vehicle) {
                matched += 1;
                interpreter.run_file(script, &mut report)?;
            } else {
                debug!(script = %script.display(), vehicle, "airframe does not match tag");
            }
        }
        info!(vehicle, matched, "phase 3: airframe scripts");
    }

    info!(
        modules = report.modules.len(),
        params = report.params.len(),
        "scan complete"
    );
    Ok(report)
}
