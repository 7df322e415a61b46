// libitaliano/src/raddoppiamento.rs
//
// Raddoppiamento fonosintattico: gemination of a word-initial consonant
// triggered by the preceding word.
//
// Works on a single line. Original words and IPA words are paired by index;
// when their counts differ the IPA is returned untouched and a diagnostic is
// reported. The result rejoins IPA words with single spaces.

use libipa_core::diagnostics::{report, Diagnostic, DiagnosticHook, Stage};
use libipa_core::ipa::{leading_unit, split_stress};
use libipa_core::text::{pair_exact, tokenize_ipa, tokenize_words};

use crate::gemination::{geminate_ipa_word, spelling_compatible};
use crate::lexicon::{clean_word, ends_in_vowel, is_cogeminant, is_pregeminant};

/// Word pairs that always geminate, whatever their classification.
const IDIOMS: &[(&str, &str)] = &[("ave", "maria"), ("spirito", "santo")];

/// Why a word is a gemination candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fixed expression (`Ave Maria`).
    Idiom,
    /// The previous word is cogeminant.
    Cogeminant,
    /// The word itself is pregeminant and follows a vowel-final word.
    Pregeminant,
}

/// Decide whether `curr` geminates after `prev`. Both words must be cleaned.
pub fn gemination_trigger(prev: &str, curr: &str) -> Option<Trigger> {
    if IDIOMS.iter().any(|&(a, b)| a == prev && b == curr) {
        return Some(Trigger::Idiom);
    }
    if is_cogeminant(prev) {
        return Some(Trigger::Cogeminant);
    }
    if is_pregeminant(curr) && ends_in_vowel(prev) {
        return Some(Trigger::Pregeminant);
    }
    None
}

/// Apply raddoppiamento fonosintattico to one line of IPA.
pub fn apply_raddoppiamento_fonosintattico(original: &str, ipa: &str) -> String {
    apply_raddoppiamento_with(original, ipa, None)
}

/// Same as [`apply_raddoppiamento_fonosintattico`], reporting count
/// mismatches to `hook` as well as the log.
pub fn apply_raddoppiamento_with(
    original: &str,
    ipa: &str,
    hook: Option<&DiagnosticHook>,
) -> String {
    let words = tokenize_words(original);
    let ipa_words = tokenize_ipa(ipa);

    let pairs = match pair_exact(&words, &ipa_words) {
        Some(pairs) => pairs,
        None => {
            report(
                hook,
                Diagnostic::WordCountMismatch {
                    stage: Stage::Raddoppiamento,
                    words: words.len(),
                    ipa_words: ipa_words.len(),
                },
            );
            return ipa.to_string();
        }
    };

    let mut out: Vec<String> = Vec::with_capacity(pairs.len());
    let mut prev: Option<String> = None;

    for pair in &pairs {
        let curr = clean_word(pair.word.text);
        let ipa_word = pair.ipa.as_str();

        let geminated = prev
            .as_deref()
            .and_then(|p| gemination_trigger(p, &curr))
            .and_then(|trigger| {
                let doubled = geminate_ipa_word(ipa_word)?;
                let onset = leading_unit(split_stress(ipa_word).1)?;
                if !spelling_compatible(pair.word.text, onset) {
                    tracing::debug!(word = pair.word.text, ipa = ipa_word, onset, "onset does not match spelling, not geminated");
                    return None;
                }
                tracing::debug!(word = pair.word.text, ?trigger, from = ipa_word, to = %doubled, "raddoppiamento");
                Some(doubled)
            });

        out.push(geminated.unwrap_or_else(|| ipa_word.to_string()));
        prev = Some(curr);
    }

    out.join(" ")
}
