//! # bootscan-core
//!
//! Static analysis of flight-controller boot sequences.
//!
//! This crate predicts which modules and parameters a PX4-style boot
//! sequence would activate for a given board/vehicle configuration, by
//! interpreting the firmware's shell-like init scripts without executing
//! them. The dialect is deliberately small: `param set`/`set-default`,
//! module `start` invocations, `if`/`else`/`fi` blocks over simple parameter
//! comparisons, and `.`-style script inclusion. Anything else on a line is
//! ignored.
//!
//! ## Modules
//!
//! - [`locator`] - Finds candidate scripts by first-line marker
//! - [`value`] - Scalar type inference for parameter values
//! - [`condition`] - The `param greater`/`param compare` condition grammar
//! - [`statement`] - Statement grammar and first-match-wins classification
//! - [`interpreter`] - The per-script conditional state machine
//! - [`report`] - The shared parameter/module accumulators
//! - [`runner`] - Board → boot script → airframe phase orchestration
//! - [`error`] - Failure taxonomy with CLI exit codes
//!
//! ## Example
//!
//! ```no_run
//! use bootscan_core::runner::{self, ScanConfig};
//!
//! let config = ScanConfig {
//!     firmware_dir: "/home/matt/src/PX4-Autopilot".into(),
//!     posix: false,
//!     board_vendor: "raspberrypi".to_string(),
//!     board_model: "pico".to_string(),
//!     vehicle: Some("4001".to_string()),
//! };
//!
//! let report = runner::run(&config).expect("scan failed");
//! println!("{}", report.modules_csv());
//! for (name, value) in &report.params {
//!     println!("{} = {}", name, value);
//! }
//! ```

pub mod condition;
pub mod error;
pub mod interpreter;
pub mod locator;
pub mod report;
pub mod runner;
pub mod statement;
pub mod value;
