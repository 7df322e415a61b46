// libitaliano/src/simplified.rs
//
// Simplified output: the original spelling with the vowels and sibilants the
// transcription disambiguates replaced by their IPA realization.
//
// - `e`/`o` take the next `e|ɛ` / `o|ɔ` of the word's IPA
// - `s`/`z` take the next sibilant of the IPA, keeping the letter's case
// - a compatible geminated onset is overlaid as an emphasized double consonant
// - everything else (punctuation, spacing, digits, unmatched words) is copied
//
// Words are paired with IPA words by position; extra words on either side are
// copied through unchanged.

use libipa_core::diagnostics::{report, Diagnostic, DiagnosticHook, Stage};
use libipa_core::ipa::units;
use libipa_core::segment::{render_html, render_plain, HtmlStyle, Segment};
use libipa_core::text::{align_lines, is_numeric_token, tokenize_ipa, tokenize_words, LineAlignment};

use crate::gemination::{geminated_consonant, spelling_compatible};
use crate::lexicon::starts_with_vowel;

/// Builds simplified output, optionally reporting alignment problems.
#[derive(Clone, Default)]
pub struct SimplifiedBuilder {
    hook: Option<DiagnosticHook>,
    style: HtmlStyle,
}

impl std::fmt::Debug for SimplifiedBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplifiedBuilder")
            .field("hook", &self.hook.is_some())
            .field("style", &self.style)
            .finish()
    }
}

impl SimplifiedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose HTML element comes from `config`.
    pub fn from_config(config: &libipa_core::Config) -> Self {
        Self::new().with_style(config.html_style())
    }

    pub fn with_hook(mut self, hook: DiagnosticHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn with_style(mut self, style: HtmlStyle) -> Self {
        self.style = style;
        self
    }

    /// Segments for `original` given its transcription `ipa`.
    ///
    /// Multi-line input is handled line by line when both sides have the same
    /// number of lines; each original line break becomes its own plain segment.
    pub fn segments(&self, original: &str, ipa: &str) -> Vec<Segment> {
        let mut out = Vec::new();
        match align_lines(original, ipa) {
            LineAlignment::Single => self.line_segments(original, ipa, &mut out),
            LineAlignment::PerLine(lines) => {
                let mut segments = Vec::new();
                for line in lines {
                    let mut line_out = Vec::new();
                    self.line_segments(line.text, line.ipa, &mut line_out);
                    // coalesced per line so a break never merges into text
                    segments.extend(coalesce(line_out));
                    push_plain(&mut segments, line.terminator);
                }
                return segments;
            }
            LineAlignment::Mismatch { lines, ipa_lines } => {
                report(
                    self.hook.as_ref(),
                    Diagnostic::LineCountMismatch {
                        stage: Stage::Simplification,
                        lines,
                        ipa_lines,
                    },
                );
                self.line_segments(original, ipa, &mut out);
            }
        }
        coalesce(out)
    }

    /// Plain-text rendering.
    pub fn build(&self, original: &str, ipa: &str) -> String {
        render_plain(&self.segments(original, ipa))
    }

    /// HTML rendering; emphasized segments are wrapped in the builder's style.
    pub fn build_html(&self, original: &str, ipa: &str) -> String {
        render_html(&self.segments(original, ipa), &self.style)
    }

    fn line_segments(&self, text: &str, ipa: &str, out: &mut Vec<Segment>) {
        let words = tokenize_words(text);
        let ipa_words = tokenize_ipa(ipa);

        if words.is_empty() || ipa_words.is_empty() {
            push_plain(out, text);
            return;
        }
        if words.len() != ipa_words.len() {
            report(
                self.hook.as_ref(),
                Diagnostic::WordCountMismatch {
                    stage: Stage::Simplification,
                    words: words.len(),
                    ipa_words: ipa_words.len(),
                },
            );
        }

        let mut last = 0;
        for (i, word) in words.iter().enumerate() {
            push_plain(out, &text[last..word.span.start]);
            match ipa_words.get(i) {
                Some(ipa_word) => out.extend(simplify_word(word.text, ipa_word.as_str())),
                None => push_plain(out, word.text),
            }
            last = word.span.end;
        }
        push_plain(out, &text[last..]);
    }
}

/// Segments for `original`/`ipa` with the default builder.
pub fn build_simplified_segments(original: &str, ipa: &str) -> Vec<Segment> {
    SimplifiedBuilder::new().segments(original, ipa)
}

pub fn build_simplified_output(original: &str, ipa: &str) -> String {
    SimplifiedBuilder::new().build(original, ipa)
}

pub fn build_simplified_output_html(original: &str, ipa: &str) -> String {
    SimplifiedBuilder::new().build_html(original, ipa)
}

/// Simplify one word against its IPA word.
pub fn simplify_word(word: &str, ipa_word: &str) -> Vec<Segment> {
    if is_numeric_token(word) {
        return vec![Segment::plain(word)];
    }

    let onset = geminated_consonant(ipa_word).filter(|unit| spelling_compatible(word, unit));

    let mut sibilants = sibilant_tokens(ipa_word);
    if onset.is_some() && starts_with_single_sibilant(word) && !sibilants.is_empty() {
        // the doubled onset yields two tokens for a single written letter
        sibilants.remove(0);
    }

    let mut segments = substitute_letters(word, ipa_word, &sibilants);

    if let Some(unit) = onset {
        let doubled = Segment::emphasized(format!("{}{}", unit, unit));
        if starts_with_vowel(word) {
            segments.insert(0, doubled);
        } else if let Some(first) = segments.first_mut() {
            *first = doubled;
        }
    }
    segments
}

fn substitute_letters(word: &str, ipa_word: &str, sibilants: &[&'static str]) -> Vec<Segment> {
    let mut e_tokens = units(ipa_word).map(|u| u.text).filter(|t| *t == "e" || *t == "ɛ");
    let mut o_tokens = units(ipa_word).map(|u| u.text).filter(|t| *t == "o" || *t == "ɔ");
    let mut s_tokens = sibilants.iter();

    word.chars()
        .map(|c| {
            let lower = c.to_lowercase().next().unwrap_or(c);
            let replacement = match lower {
                'e' => e_tokens.next().map(str::to_string),
                'o' => o_tokens.next().map(str::to_string),
                's' | 'z' => s_tokens.next().map(|token| apply_case(token, c)),
                _ => None,
            };
            match replacement {
                Some(text) => Segment::emphasized(text),
                None => Segment::plain(c.to_string()),
            }
        })
        .collect()
}

/// Sibilants of `ipa_word` in order: `t͡s`/`d͡z` read as `z`, bare `s`/`z`
/// as themselves; a long sibilant counts twice.
pub fn sibilant_tokens(ipa_word: &str) -> Vec<&'static str> {
    let mut tokens = Vec::new();
    for unit in units(ipa_word) {
        let token = match unit.text {
            "t\u{361}s" | "d\u{361}z" | "z" => "z",
            "s" => "s",
            _ => continue,
        };
        tokens.push(token);
        if unit.long {
            tokens.push(token);
        }
    }
    tokens
}

fn starts_with_single_sibilant(word: &str) -> bool {
    let mut chars = word.chars().flat_map(char::to_lowercase);
    match (chars.next(), chars.next()) {
        (Some(first @ ('s' | 'z')), second) => second != Some(first),
        _ => false,
    }
}

fn apply_case(token: &str, template: char) -> String {
    if template.is_uppercase() {
        token.to_uppercase()
    } else {
        token.to_string()
    }
}

fn push_plain(out: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        out.push(Segment::plain(text));
    }
}

/// Merge runs of adjacent plain segments.
fn coalesce(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let Some(last) = out.last_mut() {
            if !last.emphasized && !segment.emphasized {
                last.text.push_str(&segment.text);
                continue;
            }
        }
        out.push(segment);
    }
    out
}
