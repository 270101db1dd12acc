//! Line-by-line interpreter for init scripts.
//!
//! Walks a script top to bottom, classifies each line against the statement
//! grammar, and applies each statement's effects against the shared
//! accumulators. Conditional nesting is tracked as a stack of block frames,
//! one per open `if`, so an `else` buried under a dead outer block stays
//! dead. Structural bookkeeping (`if`/`else`/`fi`) always runs; the semantic
//! effect of a statement runs only while every enclosing frame is live.
//!
//! Included scripts are interpreted in place with a fresh frame stack, since
//! conditional context never crosses a file boundary, while the parameter
//! and module accumulators flow through unchanged.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::condition::ConditionEvaluator;
use crate::error::ScanError;
use crate::report::ScanReport;
use crate::statement::{Grammar, Statement};
use crate::value::ParamValue;

/// One open `if` block.
///
/// `outer_live` records whether the enclosing context was executing when the
/// block opened, `taken` whether the condition held, and `in_else` flips once
/// the block's `else` is seen.
#[derive(Debug)]
struct BlockFrame {
    outer_live: bool,
    taken: bool,
    in_else: bool,
}

impl BlockFrame {
    fn live(&self) -> bool {
        if self.in_else {
            self.outer_live && !self.taken
        } else {
            self.outer_live && self.taken
        }
    }
}

/// Interprets init scripts against a shared [`ScanReport`].
///
/// One interpreter serves a whole scan. It owns the precompiled grammars,
/// the directory include operands resolve against, and the visited-set that
/// rejects include cycles.
pub struct Interpreter {
    grammar: Grammar,
    conditions: ConditionEvaluator,
    include_dir: PathBuf,
    include_stack: HashSet<PathBuf>,
}

impl Interpreter {
    /// `include_dir` is the init-script directory that `.`-inclusion
    /// operands are resolved against.
    pub fn new(include_dir: impl Into<PathBuf>) -> Self {
        Self {
            grammar: Grammar::new(),
            conditions: ConditionEvaluator::new(),
            include_dir: include_dir.into(),
            include_stack: HashSet::new(),
        }
    }

    /// Interpret one script file, accumulating into `report`.
    pub fn run_file(&mut self, path: &Path, report: &mut ScanReport) -> Result<(), ScanError> {
        let source = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !self.include_stack.insert(canonical.clone()) {
            return Err(ScanError::CyclicInclude { path: canonical });
        }
        debug!(script = %path.display(), "interpreting");
        let result = self.run_source(&source, path, report);
        self.include_stack.remove(&canonical);
        result
    }

    /// Interpret script text with a fresh frame stack.
    ///
    /// `script` only labels structure errors; the text itself is `source`.
    pub fn run_source(
        &mut self,
        source: &str,
        script: &Path,
        report: &mut ScanReport,
    ) -> Result<(), ScanError> {
        let mut frames: Vec<BlockFrame> = Vec::new();

        for (idx, raw_line) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            let Some(statement) = self.grammar.classify(line) else {
                continue;
            };
            let live = frames.last().map_or(true, BlockFrame::live);

            match statement {
                // Structural statements run even on dead branches.
                Statement::If { condition } => {
                    // The condition is only consulted while the enclosing
                    // context is live; a dead outer block makes both arms dead.
                    let taken = live && self.conditions.eval(&condition, report);
                    frames.push(BlockFrame {
                        outer_live: live,
                        taken,
                        in_else: false,
                    });
                }
                Statement::Else => {
                    let frame = frames.last_mut().ok_or_else(|| {
                        structure(script, line_no, "`else` outside any `if` block")
                    })?;
                    if frame.in_else {
                        return Err(structure(
                            script,
                            line_no,
                            "second `else` in one `if` block",
                        ));
                    }
                    frame.in_else = true;
                }
                Statement::Fi => {
                    if frames.pop().is_none() {
                        return Err(structure(script, line_no, "`fi` without matching `if`"));
                    }
                }
                // Everything else is suppressed while skipping.
                _ if !live => trace!(line_no, line, "dead branch, skipped"),
                Statement::SetParam { name, value } => {
                    report.set_param(&name, ParamValue::infer(&value));
                }
                Statement::SetDefaultParam { name, value } => {
                    report.set_default_param(&name, ParamValue::infer(&value));
                }
                Statement::StartModule { name } => report.start_module(&name),
                Statement::Include { path } => self.include(&path, report)?,
            }
        }

        if !frames.is_empty() {
            return Err(structure(
                script,
                source.lines().count(),
                &format!("{} `if` block(s) left open at end of file", frames.len()),
            ));
        }
        Ok(())
    }

    /// `. <path>`: resolve the operand's file name against the configured
    /// init-script directory and interpret it in place. A missing target is
    /// skipped without error: includes for optional hardware profiles are
    /// expected to be absent.
    fn include(&mut self, operand: &str, report: &mut ScanReport) -> Result<(), ScanError> {
        let target = match Path::new(operand).file_name() {
            Some(file_name) => self.include_dir.join(file_name),
            None => {
                debug!(operand, "include operand has no file name, skipping");
                return Ok(());
            }
        };
        if !target.is_file() {
            debug!(operand, target = %target.display(), "include target missing, skipping");
            return Ok(());
        }
        debug!(operand, target = %target.display(), "including");
        self.run_file(&target, report)
    }
}

fn structure(script: &Path, line: usize, message: &str) -> ScanError {
    ScanError::Structure {
        script: script.to_path_buf(),
        line,
        message: message.to_string(),
    }
}
