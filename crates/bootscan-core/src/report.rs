//! The shared accumulators of a scan.
//!
//! A scan produces exactly two pieces of derived state: the resolved value of
//! every parameter and the set of modules whose `start` was reached. Both are
//! owned by the run orchestrator and passed by mutable reference into every
//! interpretation call, so recursively included scripts feed the same pair
//! without any hidden globals.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::value::ParamValue;

/// Resolved parameters and started modules, accumulated across all scripts
/// of one run in the exact textual order statements are encountered.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Parameter name to final resolved value. Names are unique; entries are
    /// overwritten in place and never deleted.
    pub params: BTreeMap<String, ParamValue>,
    /// Distinct started module names. Grows monotonically.
    pub modules: BTreeSet<String>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `param set`: always overwrites, regardless of any prior value.
    pub fn set_param(&mut self, name: &str, value: ParamValue) {
        debug!(name, value = %value, "param set");
        self.params.insert(name.to_string(), value);
    }

    /// `param set-default`: writes only while the name is unresolved. A prior
    /// `set` or `set-default` both count as resolved.
    pub fn set_default_param(&mut self, name: &str, value: ParamValue) {
        if !self.params.contains_key(name) {
            debug!(name, value = %value, "param set-default");
            self.params.insert(name.to_string(), value);
        }
    }

    /// The resolved value of `name`, if any statement has set it so far.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Record a module start. Repeated starts of one module are idempotent.
    pub fn start_module(&mut self, name: &str) {
        if self.modules.insert(name.to_string()) {
            debug!(name, "module started");
        }
    }

    /// Comma-joined list of started module names.
    pub fn modules_csv(&self) -> String {
        self.modules
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_always_overwrites() {
        let mut report = ScanReport::new();
        report.set_param("SYS_AUTOSTART", ParamValue::infer("4001"));
        report.set_param("SYS_AUTOSTART", ParamValue::infer("4250"));
        assert_eq!(
            report.param("SYS_AUTOSTART"),
            Some(&ParamValue::Number(4250.0))
        );
    }

    #[test]
    fn test_set_default_never_overwrites_set() {
        let mut report = ScanReport::new();
        report.set_param("CAL_ACC0_ID", ParamValue::infer("1310796"));
        report.set_default_param("CAL_ACC0_ID", ParamValue::infer("99"));
        assert_eq!(
            report.param("CAL_ACC0_ID"),
            Some(&ParamValue::Number(1310796.0))
        );
    }

    #[test]
    fn test_set_default_never_overwrites_earlier_default() {
        let mut report = ScanReport::new();
        report.set_default_param("BAT1_N_CELLS", ParamValue::infer("3"));
        report.set_default_param("BAT1_N_CELLS", ParamValue::infer("6"));
        assert_eq!(
            report.param("BAT1_N_CELLS"),
            Some(&ParamValue::Number(3.0))
        );
    }

    #[test]
    fn test_set_overwrites_default() {
        let mut report = ScanReport::new();
        report.set_default_param("EKF2_EN", ParamValue::infer("0"));
        report.set_param("EKF2_EN", ParamValue::infer("1"));
        assert_eq!(report.param("EKF2_EN"), Some(&ParamValue::Number(1.0)));
    }

    #[test]
    fn test_module_set_is_deduplicated() {
        let mut report = ScanReport::new();
        report.start_module("mc_rate_control");
        report.start_module("mc_att_control");
        report.start_module("mc_rate_control");
        assert_eq!(report.modules.len(), 2);
        assert_eq!(report.modules_csv(), "mc_att_control,mc_rate_control");
    }

    #[test]
    fn test_modules_csv_empty() {
        assert_eq!(ScanReport::new().modules_csv(), "");
    }
}
