//! The statement grammar: what a line of an init script can mean.
//!
//! Every recognized statement kind is one variant of a closed enum, and a
//! line is classified by an ordered table of anchored patterns compiled once
//! per interpreter. Ordering is load-bearing: the first matching pattern
//! wins, so `param set-default` is tried before the looser `param set`, and
//! both before the bare `<name> start` rule that would otherwise swallow
//! them. Lines matching nothing are not errors; the dialect ignores them.

use regex::Regex;

/// One recognized init-script statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `param set <name> <value> [ignored...]`
    SetParam { name: String, value: String },
    /// `param set-default <name> <value> [ignored...]`
    SetDefaultParam { name: String, value: String },
    /// `<name> start [ignored...]`
    StartModule { name: String },
    /// `if <condition text>`
    If { condition: String },
    /// `else`
    Else,
    /// `fi`
    Fi,
    /// `. <path-segments>/<filename>`
    Include { path: String },
}

/// The precompiled statement patterns, anchored over the whole line.
pub struct Grammar {
    set_default: Regex,
    set: Regex,
    if_: Regex,
    else_: Regex,
    fi: Regex,
    include: Regex,
    start: Regex,
}

// Patterns are fixed literals; a compile failure is a programming error
// caught by the unit tests below.
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("statement pattern must compile")
}

impl Grammar {
    pub fn new() -> Self {
        Self {
            set_default: pattern(r"^param\s+set-default\s+(?P<name>\w+)\s+(?P<value>\S+).*$"),
            set: pattern(r"^param\s+set\s+(?P<name>\w+)\s+(?P<value>\S+).*$"),
            if_: pattern(r"^if\s+(?P<condition>.+)$"),
            else_: pattern(r"^else$"),
            fi: pattern(r"^fi$"),
            include: pattern(r"^\.\s+(?P<path>\S+)$"),
            start: pattern(r"^(?P<name>\w+)\s+start(\s+.*)?$"),
        }
    }

    /// Classify one trimmed line.
    ///
    /// Returns `None` for blank lines, `#` comments, and anything the
    /// grammar does not recognize. Rules are tried most specific first and
    /// the first match wins.
    pub fn classify(&self, line: &str) -> Option<Statement> {
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if let Some(c) = self.set_default.captures(line) {
            return Some(Statement::SetDefaultParam {
                name: c["name"].to_string(),
                value: c["value"].to_string(),
            });
        }
        if let Some(c) = self.set.captures(line) {
            return Some(Statement::SetParam {
                name: c["name"].to_string(),
                value: c["value"].to_string(),
            });
        }
        if let Some(c) = self.if_.captures(line) {
            return Some(Statement::If {
                condition: c["condition"].to_string(),
            });
        }
        if self.else_.is_match(line) {
            return Some(Statement::Else);
        }
        if self.fi.is_match(line) {
            return Some(Statement::Fi);
        }
        if let Some(c) = self.include.captures(line) {
            return Some(Statement::Include {
                path: c["path"].to_string(),
            });
        }
        if let Some(c) = self.start.captures(line) {
            return Some(Statement::StartModule {
                name: c["name"].to_string(),
            });
        }
        None
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Option<Statement> {
        Grammar::new().classify(line)
    }

    #[test]
    fn test_param_set() {
        assert_eq!(
            classify("param set SYS_AUTOSTART 4001"),
            Some(Statement::SetParam {
                name: "SYS_AUTOSTART".to_string(),
                value: "4001".to_string(),
            })
        );
    }

    #[test]
    fn test_param_set_trailing_tokens_ignored() {
        assert_eq!(
            classify("param set CAL_ACC0_ID 1310796 # factory"),
            Some(Statement::SetParam {
                name: "CAL_ACC0_ID".to_string(),
                value: "1310796".to_string(),
            })
        );
    }

    #[test]
    fn test_set_default_wins_over_set() {
        // Ordering contract: the tighter rule must be matched, not `set`
        // with a mangled name.
        assert_eq!(
            classify("param set-default BAT1_N_CELLS 3"),
            Some(Statement::SetDefaultParam {
                name: "BAT1_N_CELLS".to_string(),
                value: "3".to_string(),
            })
        );
    }

    #[test]
    fn test_module_start() {
        assert_eq!(
            classify("mc_rate_control start"),
            Some(Statement::StartModule {
                name: "mc_rate_control".to_string(),
            })
        );
    }

    #[test]
    fn test_module_start_with_args() {
        assert_eq!(
            classify("mc_rate_control start -h"),
            Some(Statement::StartModule {
                name: "mc_rate_control".to_string(),
            })
        );
    }

    #[test]
    fn test_module_start_requires_start_word() {
        assert_eq!(classify("mc_rate_control status"), None);
        assert_eq!(classify("mc_rate_control restart"), None);
    }

    #[test]
    fn test_if_captures_condition_text() {
        assert_eq!(
            classify("if param compare SYS_AUTOSTART 4001"),
            Some(Statement::If {
                condition: "param compare SYS_AUTOSTART 4001".to_string(),
            })
        );
    }

    #[test]
    fn test_else_and_fi_are_exact() {
        assert_eq!(classify("else"), Some(Statement::Else));
        assert_eq!(classify("fi"), Some(Statement::Fi));
        assert_eq!(classify("elsewhere"), None);
        assert_eq!(classify("fish start"), Some(Statement::StartModule {
            name: "fish".to_string(),
        }));
    }

    #[test]
    fn test_include() {
        assert_eq!(
            classify(". ${R}etc/init.d/rc.sensors"),
            Some(Statement::Include {
                path: "${R}etc/init.d/rc.sensors".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("# param set FOO 1"), None);
    }

    #[test]
    fn test_unknown_lines_are_ignored() {
        assert_eq!(classify("set +e"), None);
        assert_eq!(classify("echo booting"), None);
        assert_eq!(classify("mount -t procfs /proc"), None);
    }
}
