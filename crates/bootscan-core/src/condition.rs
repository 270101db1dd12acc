//! Evaluation of `if` condition expressions.

use regex::Regex;
use tracing::debug;

use crate::report::ScanReport;
use crate::value::ParamValue;

/// Evaluates the restricted condition grammar against resolved parameters.
///
/// One grammar is recognized today:
///
/// ```text
/// param (greater|compare) [flag tokens...] <name> <value>
/// ```
///
/// Flag tokens (`-s` and friends) between the operator and the parameter
/// name are skipped. Everything that does not fit (unknown grammars,
/// unresolved parameters, a `greater` over non-numeric operands) evaluates
/// to false, so unknown conditions read as branches not taken.
pub struct ConditionEvaluator {
    param_cmp: Regex,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        // Fixed literal, anchored over the whole condition text. A compile
        // failure is a programming error caught by the tests below.
        let param_cmp = Regex::new(
            r"^param\s+(?P<op>greater|compare)\s+(?:-\S+\s+)*(?P<name>\w+)\s+(?P<value>\S+)$",
        )
        .expect("condition pattern must compile");
        Self { param_cmp }
    }

    /// Evaluate one condition expression against the parameters resolved so
    /// far. Only a successful comparison returns true.
    pub fn eval(&self, condition: &str, report: &ScanReport) -> bool {
        let Some(caps) = self.param_cmp.captures(condition.trim()) else {
            debug!(condition, "unrecognized condition, treated as false");
            return false;
        };

        let name = &caps["name"];
        let comparand = ParamValue::infer(&caps["value"]);
        let Some(resolved) = report.param(name) else {
            debug!(name, condition, "parameter unresolved, condition false");
            return false;
        };

        let result = match &caps["op"] {
            "greater" => match (resolved.as_number(), comparand.as_number()) {
                (Some(current), Some(threshold)) => current > threshold,
                _ => false,
            },
            "compare" => *resolved == comparand,
            _ => unreachable!("pattern admits only greater|compare"),
        };
        debug!(name, condition, result, "condition evaluated");
        result
    }
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(name: &str, raw: &str) -> ScanReport {
        let mut report = ScanReport::new();
        report.set_param(name, ParamValue::infer(raw));
        report
    }

    fn eval(condition: &str, report: &ScanReport) -> bool {
        ConditionEvaluator::new().eval(condition, report)
    }

    #[test]
    fn test_compare_equal_numbers() {
        let report = report_with("SYS_AUTOSTART", "4001");
        assert!(eval("param compare SYS_AUTOSTART 4001", &report));
        assert!(!eval("param compare SYS_AUTOSTART 4250", &report));
    }

    #[test]
    fn test_compare_text_values() {
        let report = report_with("SYS_MODE", "ON");
        assert!(eval("param compare SYS_MODE ON", &report));
        assert!(!eval("param compare SYS_MODE OFF", &report));
    }

    #[test]
    fn test_greater_strict() {
        let report = report_with("BAT1_V_CHARGED", "4.2");
        assert!(eval("param greater BAT1_V_CHARGED 4", &report));
        assert!(!eval("param greater BAT1_V_CHARGED 4.2", &report));
        assert!(!eval("param greater BAT1_V_CHARGED 5", &report));
    }

    #[test]
    fn test_greater_on_text_is_false() {
        let report = report_with("SYS_MODE", "ON");
        assert!(!eval("param greater SYS_MODE 1", &report));
    }

    #[test]
    fn test_unresolved_parameter_is_false() {
        let report = ScanReport::new();
        assert!(!eval("param compare SYS_AUTOSTART 4001", &report));
        assert!(!eval("param greater SYS_AUTOSTART 0", &report));
    }

    #[test]
    fn test_flag_tokens_are_skipped() {
        let report = report_with("BAT1_V_CHARGED", "4.2");
        assert!(eval("param greater -s BAT1_V_CHARGED 0", &report));
    }

    #[test]
    fn test_unknown_grammar_is_false() {
        let report = report_with("SYS_AUTOSTART", "4001");
        assert!(!eval("[ -f /etc/extras ]", &report));
        assert!(!eval("param between SYS_AUTOSTART 1 2", &report));
        assert!(!eval("ver hwcmp PX4_FMU_V5", &report));
    }

    #[test]
    fn test_no_boolean_connectives() {
        // Connectives are outside the dialect; the whole expression fails to
        // match and reads as false.
        let report = report_with("SYS_AUTOSTART", "4001");
        assert!(!eval(
            "param compare SYS_AUTOSTART 4001 && param greater SYS_AUTOSTART 0",
            &report
        ));
    }
}
