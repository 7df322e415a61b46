// libitaliano/src/gemination.rs
//
// Italian geminable consonants and the spellings their onsets may have.
//
// Both the raddoppiamento engine and the simplified builder consult this one
// table: a unit not listed here is never doubled, and a listed unit is only
// doubled (or overlaid) on a word whose spelling can carry it.

use libipa_core::ipa::{geminated_onset, leading_unit, split_stress};

use crate::lexicon::starts_with_vowel;

/// IPA consonant or affricate -> orthographic onsets it may be spelled with.
pub const GEMINATION_TABLE: &[(&str, &[&str])] = &[
    ("p", &["p"]),
    ("b", &["b"]),
    ("t", &["t"]),
    ("d", &["d"]),
    ("k", &["c", "k", "q"]),
    ("\u{261}", &["g"]),
    ("g", &["g"]),
    ("f", &["f"]),
    ("v", &["v"]),
    ("s", &["s"]),
    ("z", &["z", "s"]),
    ("ʃ", &["sc"]),
    ("ʒ", &["g"]),
    ("m", &["m"]),
    ("n", &["n"]),
    ("ɲ", &["gn"]),
    ("ŋ", &["n"]),
    ("l", &["l"]),
    ("ʎ", &["gl"]),
    ("r", &["r"]),
    ("t\u{361}ʃ", &["c"]),
    ("d\u{361}ʒ", &["g"]),
    ("t\u{361}s", &["z"]),
    ("d\u{361}z", &["z"]),
];

fn spellings(unit: &str) -> Option<&'static [&'static str]> {
    GEMINATION_TABLE
        .iter()
        .find(|(ipa, _)| *ipa == unit)
        .map(|(_, onsets)| *onsets)
}

/// Whether `unit` is an Italian consonant or affricate that may be doubled.
pub fn is_geminable(unit: &str) -> bool {
    spellings(unit).is_some()
}

/// Whether `word` can be written with a geminated `unit` at its onset.
///
/// Vowel-initial words are always compatible: the doubled consonant then
/// comes from the preceding word and consumes none of this word's letters.
pub fn spelling_compatible(word: &str, unit: &str) -> bool {
    if starts_with_vowel(word) {
        return true;
    }
    let lower = word.to_lowercase();
    spellings(unit).map_or(false, |onsets| onsets.iter().any(|o| lower.starts_with(o)))
}

/// The geminated onset of `ipa_word` when it is a geminable consonant.
pub fn geminated_consonant(ipa_word: &str) -> Option<&str> {
    geminated_onset(ipa_word).filter(|unit| is_geminable(unit))
}

/// Double the onset of `ipa_word`, keeping its stress prefix in front.
///
/// Returns `None` when the onset is a vowel or a non-geminable unit, or when
/// the onset is already geminated.
pub fn geminate_ipa_word(ipa_word: &str) -> Option<String> {
    let (stress, body) = split_stress(ipa_word);
    let onset = leading_unit(body)?;
    if !is_geminable(onset) || geminated_onset(ipa_word).is_some() {
        return None;
    }

    let mut out = String::with_capacity(ipa_word.len() + onset.len());
    out.push_str(stress);
    out.push_str(onset);
    out.push_str(body);
    Some(out)
}
