// core/src/text.rs
//
// Word tokenization and alignment between an orthographic text and its IPA
// transcription.
//
// Both post-processing pipelines consume this module and nothing else to
// decide which IPA word belongs to which written word:
// - orthographic words come from a Unicode letter/number pattern that keeps a
//   single internal apostrophe (`dall'incontro` is one word)
// - IPA words are whitespace-delimited tokens, empty tokens discarded
// - multi-line input is aligned line by line only when both sides have the
//   same number of lines

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Letters or digits, optionally joined by an ASCII apostrophe or U+2019.
///
/// Combining marks are accepted after the first character so decomposed
/// accents (`e` + U+0300) and tie bars never split a word.
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}][\p{L}\p{M}\p{N}]*(?:['\x{2019}][\p{L}\p{N}][\p{L}\p{M}\p{N}]*)*")
        .expect("word pattern must compile")
});

/// A word of the original text with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    /// The word exactly as written (case and apostrophes preserved).
    pub text: &'a str,
    /// Byte range of the word in the text it was tokenized from.
    pub span: Range<usize>,
}

impl<'a> Word<'a> {
    /// True when every character is a Unicode number (`4`, `2024`).
    pub fn is_numeric(&self) -> bool {
        is_numeric_token(self.text)
    }
}

/// A whitespace-delimited token of an IPA transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpaWord<'a> {
    pub text: &'a str,
}

impl<'a> IpaWord<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }
}

/// An index-aligned (word, IPA word) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair<'a> {
    pub word: Word<'a>,
    pub ipa: IpaWord<'a>,
}

/// Trim `text` and compose it to NFC, the form handed to engines and rules.
pub fn normalize_input(text: &str) -> String {
    text.trim().nfc().collect()
}

/// Tokenize orthographic text into words, in order of appearance.
pub fn tokenize_words(text: &str) -> Vec<Word<'_>> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| Word {
            text: m.as_str(),
            span: m.range(),
        })
        .collect()
}

/// Number of words `tokenize_words` would produce.
pub fn count_words(text: &str) -> usize {
    WORD_PATTERN.find_iter(text).count()
}

/// Tokenize an IPA transcription on runs of whitespace.
pub fn tokenize_ipa(ipa: &str) -> Vec<IpaWord<'_>> {
    ipa.split_whitespace().map(IpaWord::new).collect()
}

/// True when `token` is non-empty and made only of Unicode numbers.
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}

/// Pair words with IPA words one to one.
///
/// Returns `None` when the counts differ; callers then leave the text alone.
pub fn pair_exact<'a>(words: &[Word<'a>], ipa_words: &[IpaWord<'a>]) -> Option<Vec<WordPair<'a>>> {
    if words.len() != ipa_words.len() {
        return None;
    }
    Some(pair_positional(words, ipa_words))
}

/// Pair words with IPA words by position up to the shorter sequence.
pub fn pair_positional<'a>(words: &[Word<'a>], ipa_words: &[IpaWord<'a>]) -> Vec<WordPair<'a>> {
    words
        .iter()
        .zip(ipa_words.iter())
        .map(|(word, ipa)| WordPair {
            word: word.clone(),
            ipa: *ipa,
        })
        .collect()
}

/// A line of text together with the break that ended it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// `"\n"`, `"\r\n"`, or `""` for the last line.
    pub terminator: &'a str,
}

/// Split on `\n` or `\r\n`, keeping each line's terminator.
///
/// Always yields at least one line; a trailing break yields a final empty line.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('\n') {
        let (body, terminator) = if pos > 0 && rest.as_bytes()[pos - 1] == b'\r' {
            (&rest[..pos - 1], &rest[pos - 1..=pos])
        } else {
            (&rest[..pos], &rest[pos..=pos])
        };
        lines.push(Line {
            text: body,
            terminator,
        });
        rest = &rest[pos + 1..];
    }
    lines.push(Line {
        text: rest,
        terminator: "",
    });
    lines
}

/// One original line paired with its IPA line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedLine<'a> {
    pub text: &'a str,
    pub ipa: &'a str,
    /// Break that followed the original line.
    pub terminator: &'a str,
    /// Break that followed the IPA line.
    pub ipa_terminator: &'a str,
}

/// How an (original, IPA) pair should be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAlignment<'a> {
    /// Neither side has a line break.
    Single,
    /// Both sides have the same number of lines.
    PerLine(Vec<AlignedLine<'a>>),
    /// Line counts differ; the whole input is treated as one line.
    Mismatch { lines: usize, ipa_lines: usize },
}

/// Decide whether `text` and `ipa` can be processed line by line.
pub fn align_lines<'a>(text: &'a str, ipa: &'a str) -> LineAlignment<'a> {
    if !text.contains('\n') && !ipa.contains('\n') {
        return LineAlignment::Single;
    }

    let lines = split_lines(text);
    let ipa_lines = split_lines(ipa);
    if lines.len() != ipa_lines.len() {
        return LineAlignment::Mismatch {
            lines: lines.len(),
            ipa_lines: ipa_lines.len(),
        };
    }

    LineAlignment::PerLine(
        lines
            .iter()
            .zip(ipa_lines.iter())
            .map(|(line, ipa_line)| AlignedLine {
                text: line.text,
                ipa: ipa_line.text,
                terminator: line.terminator,
                ipa_terminator: ipa_line.terminator,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(words: &[Word<'a>]) -> Vec<&'a str> {
        words.iter().map(|w| w.text).collect()
    }

    #[test]
    fn apostrophe_joins_contractions() {
        let words = tokenize_words("dall'incontro tra competenze");
        assert_eq!(texts(&words), vec!["dall'incontro", "tra", "competenze"]);
        assert_eq!(words[0].span, 0..13);
    }

    #[test]
    fn typographic_apostrophe_joins_too() {
        let words = tokenize_words("l\u{2019}amico è qui");
        assert_eq!(texts(&words), vec!["l\u{2019}amico", "è", "qui"]);
    }

    #[test]
    fn trailing_apostrophe_is_not_part_of_word() {
        let words = tokenize_words("fra' Cristoforo");
        assert_eq!(texts(&words), vec!["fra", "Cristoforo"]);
    }

    #[test]
    fn punctuation_and_spaces_are_skipped() {
        let words = tokenize_words("  Ciao, mondo! (4 volte)");
        assert_eq!(texts(&words), vec!["Ciao", "mondo", "4", "volte"]);
        assert!(words[2].is_numeric());
        assert!(!words[0].is_numeric());
    }

    #[test]
    fn decomposed_accent_stays_in_word() {
        let words = tokenize_words("citta\u{300} nuova");
        assert_eq!(texts(&words), vec!["citta\u{300}", "nuova"]);
    }

    #[test]
    fn input_is_trimmed_and_composed() {
        assert_eq!(normalize_input("  citta\u{300} nuova\n"), "città nuova");
        assert_eq!(normalize_input(" \t "), "");
    }

    #[test]
    fn ipa_tokens_ignore_whitespace_runs() {
        let ipa = tokenize_ipa("  la  t͡ʃitˈta\tˈnwɔːva ");
        let texts: Vec<&str> = ipa.iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["la", "t͡ʃitˈta", "ˈnwɔːva"]);
        assert!(tokenize_ipa("   ").is_empty());
    }

    #[test]
    fn exact_pairing_requires_equal_counts() {
        let words = tokenize_words("una frase lunga");
        let ipa = tokenize_ipa("ˈuːna ˈfraːse");
        assert!(pair_exact(&words, &ipa).is_none());
        assert_eq!(pair_positional(&words, &ipa).len(), 2);
    }

    #[test]
    fn split_lines_keeps_terminators() {
        let lines = split_lines("uno\r\ndue\ntre");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Line { text: "uno", terminator: "\r\n" });
        assert_eq!(lines[1], Line { text: "due", terminator: "\n" });
        assert_eq!(lines[2], Line { text: "tre", terminator: "" });
        assert_eq!(split_lines("").len(), 1);
    }

    #[test]
    fn align_lines_by_count() {
        assert_eq!(align_lines("a b", "a b"), LineAlignment::Single);

        match align_lines("persone\nscelte", "pɛrˈsoːne\nˈʃɛlte") {
            LineAlignment::PerLine(lines) => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].ipa, "pɛrˈsoːne");
                assert_eq!(lines[0].terminator, "\n");
                assert_eq!(lines[1].text, "scelte");
            }
            other => panic!("expected per-line alignment, got {:?}", other),
        }

        assert_eq!(
            align_lines("prima\nseconda", "ˈpriːma sɛˈkonda"),
            LineAlignment::Mismatch { lines: 2, ipa_lines: 1 }
        );
    }
}
