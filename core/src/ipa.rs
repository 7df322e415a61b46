//! IPA scanning primitives.
//!
//! Engine output is treated as a sequence of *units*: a tie-barred affricate
//! (`t͡ʃ`, `d͡ʒ`, `t͡s`, `d͡z`) is one unit and is always matched before any
//! single code point, so a tie bar is never separated from its consonants.
//! A unit immediately followed by the length mark `ː` is reported as long.

/// Primary stress mark.
pub const PRIMARY_STRESS: char = 'ˈ';
/// Secondary stress mark.
pub const SECONDARY_STRESS: char = 'ˌ';
/// Length mark used for long vowels and geminate consonants.
pub const LENGTH_MARK: char = 'ː';
/// Combining double inverted breve joining the two halves of an affricate.
pub const TIE_BAR: char = '\u{361}';

/// Tie-barred affricates, matched atomically.
pub const AFFRICATES: [&str; 4] = ["t\u{361}ʃ", "d\u{361}ʒ", "t\u{361}s", "d\u{361}z"];

pub fn is_stress_mark(c: char) -> bool {
    c == PRIMARY_STRESS || c == SECONDARY_STRESS
}

/// Split a word into its leading run of stress marks and the remainder.
pub fn split_stress(ipa_word: &str) -> (&str, &str) {
    let body = ipa_word.trim_start_matches(is_stress_mark);
    let prefix_len = ipa_word.len() - body.len();
    (&ipa_word[..prefix_len], body)
}

/// The first unit of `s`: an affricate if one starts here, else one code point.
pub fn leading_unit(s: &str) -> Option<&str> {
    if let Some(affricate) = AFFRICATES.iter().find(|a| s.starts_with(**a)) {
        return Some(&s[..affricate.len()]);
    }
    let c = s.chars().next()?;
    Some(&s[..c.len_utf8()])
}

/// One scanned unit with its byte offset in the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpaUnit<'a> {
    pub index: usize,
    pub text: &'a str,
    /// Followed by `ː` (the mark itself is consumed with the unit).
    pub long: bool,
}

/// Cursor over the units of an IPA string.
#[derive(Debug, Clone)]
pub struct UnitScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> UnitScanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for UnitScanner<'a> {
    type Item = IpaUnit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        let text = leading_unit(rest)?;
        let index = self.pos;
        self.pos += text.len();

        // a bare length mark is its own unit, never a modifier of itself
        let long = !text.starts_with(LENGTH_MARK) && self.src[self.pos..].starts_with(LENGTH_MARK);
        if long {
            self.pos += LENGTH_MARK.len_utf8();
        }

        Some(IpaUnit { index, text, long })
    }
}

/// Scan the units of `s`.
pub fn units(s: &str) -> UnitScanner<'_> {
    UnitScanner::new(s)
}

/// The onset unit of `ipa_word` when it is geminated.
///
/// After stripping stress marks, the onset is geminated when it is repeated
/// immediately (`kk`, `t͡ʃt͡ʃ`) or immediately followed by `ː`. Whether the
/// unit is a consonant is left to the caller's inventory.
pub fn geminated_onset(ipa_word: &str) -> Option<&str> {
    let (_, body) = split_stress(ipa_word);
    let mut scanner = units(body);
    let first = scanner.next()?;
    if first.long {
        return Some(first.text);
    }
    let second = scanner.next()?;
    (second.text == first.text).then_some(first.text)
}

/// Normalize raw engine output: drop `_` phoneme separators, collapse runs of
/// spaces into one, trim.
pub fn clean_engine_output(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = false;
    for c in raw.chars() {
        match c {
            '_' => continue,
            ' ' => {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            }
            _ => {
                out.push(c);
                last_was_space = false;
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_prefix_is_split_off() {
        assert_eq!(split_stress("ˈkaːsa"), ("ˈ", "kaːsa"));
        assert_eq!(split_stress("ˌˈa"), ("ˌˈ", "a"));
        assert_eq!(split_stress("anˈdjaːmo"), ("", "anˈdjaːmo"));
    }

    #[test]
    fn affricates_are_atomic() {
        assert_eq!(leading_unit("t͡ʃena"), Some("t͡ʃ"));
        assert_eq!(leading_unit("tana"), Some("t"));
        assert_eq!(leading_unit(""), None);

        let scanned: Vec<&str> = units("d͡zɛːro").map(|u| u.text).collect();
        assert_eq!(scanned, vec!["d͡z", "ɛ", "r", "o"]);
    }

    #[test]
    fn length_mark_is_folded_into_unit() {
        let scanned: Vec<IpaUnit> = units("karrot͡sːina").collect();
        let affricate = scanned.iter().find(|u| u.text == "t͡s").unwrap();
        assert!(affricate.long);
        assert_eq!(affricate.index, 5);
        assert!(!scanned.iter().any(|u| u.text == "ː"));
    }

    #[test]
    fn geminated_onset_detection() {
        assert_eq!(geminated_onset("ˈkkaːsa"), Some("k"));
        assert_eq!(geminated_onset("ˈt͡ʃt͡ʃeːna"), Some("t͡ʃ"));
        assert_eq!(geminated_onset("sːole"), Some("s"));
        assert_eq!(geminated_onset("ˈkaːsa"), None);
        assert_eq!(geminated_onset("ˈt͡ʃao"), None);
        assert_eq!(geminated_onset("ˈ"), None);
    }

    #[test]
    fn engine_output_is_cleaned() {
        assert_eq!(clean_engine_output(" k_a_s_a   b_ɛ_l_l_a \n"), "kasa bɛlla");
        assert_eq!(clean_engine_output("uno\ndue"), "uno\ndue");
    }
}
