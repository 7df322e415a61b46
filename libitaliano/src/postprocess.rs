// libitaliano/src/postprocess.rs
//
// Italian rewriting of fresh engine output.
//
// Raddoppiamento is single-line; multi-line text is handed to it one line at
// a time when the original and the IPA have the same number of lines, and the
// IPA's own line breaks are kept between the rewritten lines.

use libipa_core::diagnostics::{report, Diagnostic, DiagnosticHook, Stage};
use libipa_core::phonemizer::IpaPostProcessor;
use libipa_core::text::{align_lines, LineAlignment};

use crate::config::ItalianConfig;
use crate::raddoppiamento::apply_raddoppiamento_with;

#[derive(Clone)]
pub struct ItalianPostProcessor {
    raddoppiamento: bool,
    line_aware: bool,
    hook: Option<DiagnosticHook>,
}

impl std::fmt::Debug for ItalianPostProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItalianPostProcessor")
            .field("raddoppiamento", &self.raddoppiamento)
            .field("line_aware", &self.line_aware)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Default for ItalianPostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItalianPostProcessor {
    /// All rules enabled, line-aware, no hook.
    pub fn new() -> Self {
        Self {
            raddoppiamento: true,
            line_aware: true,
            hook: None,
        }
    }

    pub fn from_config(config: &ItalianConfig) -> Self {
        Self {
            raddoppiamento: config.raddoppiamento,
            line_aware: config.line_aware,
            hook: None,
        }
    }

    pub fn with_hook(mut self, hook: DiagnosticHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Rewrite `ipa`, the transcription of `original`.
    pub fn process(&self, original: &str, ipa: &str) -> String {
        if !self.raddoppiamento {
            return ipa.to_string();
        }
        if !self.line_aware {
            return apply_raddoppiamento_with(original, ipa, self.hook.as_ref());
        }

        match align_lines(original, ipa) {
            LineAlignment::Single => apply_raddoppiamento_with(original, ipa, self.hook.as_ref()),
            LineAlignment::PerLine(lines) => {
                let mut out = String::with_capacity(ipa.len() + 8);
                for line in lines {
                    out.push_str(&apply_raddoppiamento_with(line.text, line.ipa, self.hook.as_ref()));
                    out.push_str(line.ipa_terminator);
                }
                out
            }
            LineAlignment::Mismatch { lines, ipa_lines } => {
                report(
                    self.hook.as_ref(),
                    Diagnostic::LineCountMismatch {
                        stage: Stage::Raddoppiamento,
                        lines,
                        ipa_lines,
                    },
                );
                apply_raddoppiamento_with(original, ipa, self.hook.as_ref())
            }
        }
    }
}

impl IpaPostProcessor for ItalianPostProcessor {
    fn post_process(&self, original: &str, ipa: &str) -> String {
        self.process(original, ipa)
    }
}

/// Full Italian post-processing with default settings.
pub fn post_process_italian_ipa(original: &str, ipa: &str) -> String {
    ItalianPostProcessor::new().process(original, ipa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_rules_are_identity() {
        let mut config = ItalianConfig::default();
        config.raddoppiamento = false;
        let post = ItalianPostProcessor::from_config(&config);
        assert_eq!(post.process("a casa", "a ˈkaːsa"), "a ˈkaːsa");
    }

    #[test]
    fn single_line_delegates() {
        assert_eq!(post_process_italian_ipa("a casa", "a ˈkaːsa"), "a ˈkkaːsa");
    }
}
