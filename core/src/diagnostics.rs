//! Side-channel diagnostics.
//!
//! Transforms never fail: when tokenization does not line up they return
//! their input unchanged and report what happened here. Every report is
//! logged through `tracing`; callers may additionally wire a hook.

use std::fmt;
use std::sync::Arc;

/// Which transform produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Raddoppiamento,
    Simplification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Raddoppiamento => f.write_str("raddoppiamento"),
            Stage::Simplification => f.write_str("simplification"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Original and IPA word counts differ.
    WordCountMismatch {
        stage: Stage,
        words: usize,
        ipa_words: usize,
    },
    /// Both sides are multi-line but with different line counts; the input
    /// was processed as a single line.
    LineCountMismatch {
        stage: Stage,
        lines: usize,
        ipa_lines: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::WordCountMismatch {
                stage,
                words,
                ipa_words,
            } => write!(
                f,
                "{}: word count mismatch between original ({}) and IPA ({})",
                stage, words, ipa_words
            ),
            Diagnostic::LineCountMismatch {
                stage,
                lines,
                ipa_lines,
            } => write!(
                f,
                "{}: line count mismatch between original ({}) and IPA ({})",
                stage, lines, ipa_lines
            ),
        }
    }
}

/// Optional observer for diagnostics.
pub type DiagnosticHook = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Log `diagnostic` and forward it to `hook` when one is wired.
pub fn report(hook: Option<&DiagnosticHook>, diagnostic: Diagnostic) {
    match &diagnostic {
        Diagnostic::WordCountMismatch {
            stage,
            words,
            ipa_words,
        } => tracing::warn!(%stage, words, ipa_words, "word count mismatch between original and IPA text"),
        Diagnostic::LineCountMismatch {
            stage,
            lines,
            ipa_lines,
        } => tracing::warn!(%stage, lines, ipa_lines, "line count mismatch, processing as a single line"),
    }
    if let Some(hook) = hook {
        hook(&diagnostic);
    }
}
