// libitaliano/src/lexicon.rs
//
// Lexical classes relevant to raddoppiamento fonosintattico.
//
// Word lists follow the standard grammatical description of the rule:
// - https://it.wikipedia.org/wiki/Raddoppiamento_fonosintattico
// - https://it.wikipedia.org/wiki/Dizione_della_lingua_italiana
//
// A word may belong to several lists; the rule engine only cares whether it
// is in any inclusion list or in an exclusion list. Entries are stored in
// their `clean_word` form.

use phf::{phf_set, Set};
use unicode_normalization::UnicodeNormalization;

/// Monosyllabic verbs that trigger gemination.
static VERBS: Set<&'static str> = phf_set! {
    "è", "fu", "ho", "ha", "vo", "va", "do", "dà", "da", "fo", "fa", "fé",
    "so", "sa", "sto", "sta", "stiè", "può", "dì",
};

static CONJUNCTIONS: Set<&'static str> = phf_set! {
    "che", "ché", "e", "ma", "né", "o", "se",
};

static PRONOUNS: Set<&'static str> = phf_set! {
    "che", "chi", "ciò", "sé", "tu", "me", "te",
};

/// `de` and `ne` are the poetic prepositions; the clitic `ne` is excluded below.
static PREPOSITIONS: Set<&'static str> = phf_set! {
    "a", "da", "su", "tra", "fra", "de", "ne",
};

static ADVERBS: Set<&'static str> = phf_set! {
    "su", "sù", "giù", "qui", "qua", "lì", "là", "sì", "no", "già", "più",
    "ve", "mo",
};

static NOUNS: Set<&'static str> = phf_set! {
    "blu", "co", "dì", "gru", "gnu", "pro", "re", "sci", "tè", "tre",
};

/// Truncated forms; `fra'` and `pre'` lose their apostrophe when cleaned.
/// `po'` and `pro` (valoroso) are deliberately absent.
static TRUNCATIONS: Set<&'static str> = phf_set! {
    "fé", "fra", "pre", "piè",
};

/// Names of letters of the alphabet.
static LETTERS: Set<&'static str> = phf_set! {
    "a", "bi", "ci", "di", "e", "gi", "i", "o", "pi", "qu", "cu", "ti", "u",
    "vu", "vi", "be", "ce", "de", "ge", "pe", "te", "ve", "ca", "mi", "chi",
    "ni", "csi",
};

static MUSICAL_NOTES: Set<&'static str> = phf_set! {
    "do", "re", "mi", "fa", "la", "si",
};

/// Polysyllables that trigger gemination.
static OTHER_COGEMINANT: Set<&'static str> = phf_set! {
    "come", "dove", "qualche", "sopra",
};

/// Articles and clitic pronouns: never trigger gemination.
static NON_COGEMINANT: Set<&'static str> = phf_set! {
    "il", "lo", "la", "i", "gli", "le",
    "mi", "ti", "si", "ci", "vi", "li", "ne",
};

/// Monosyllables ending in a falling diphthong that do not trigger gemination.
static NON_COGEMINANT_FALLING_DIPHTHONGS: Set<&'static str> = phf_set! {
    "poi", "mai", "sei",
};

/// Words whose own onset geminates after a vowel-final word.
static PREGEMINANT: Set<&'static str> = phf_set! {
    "dio", "dèi", "dea", "dee",
};

/// Characters removed by `clean_word`.
const STRIPPED: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '«', '»', '\u{201C}', '\u{201D}', '\u{201E}',
    '\u{2019}',
];

const OXYTONE_FINALS: &[char] = &['à', 'è', 'é', 'ì', 'ò', 'ó', 'ù'];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'à', 'è', 'é', 'ì', 'ò', 'ó', 'ù'];

/// Named word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalCategory {
    Verb,
    Conjunction,
    Pronoun,
    Preposition,
    Adverb,
    Noun,
    Truncation,
    Letter,
    MusicalNote,
    OtherCogeminant,
    Pregeminant,
    NonCogeminant,
    NonCogeminantFallingDiphthong,
}

impl LexicalCategory {
    pub const ALL: [LexicalCategory; 13] = [
        LexicalCategory::Verb,
        LexicalCategory::Conjunction,
        LexicalCategory::Pronoun,
        LexicalCategory::Preposition,
        LexicalCategory::Adverb,
        LexicalCategory::Noun,
        LexicalCategory::Truncation,
        LexicalCategory::Letter,
        LexicalCategory::MusicalNote,
        LexicalCategory::OtherCogeminant,
        LexicalCategory::Pregeminant,
        LexicalCategory::NonCogeminant,
        LexicalCategory::NonCogeminantFallingDiphthong,
    ];

    /// The cleaned words of this list.
    pub fn words(self) -> &'static Set<&'static str> {
        match self {
            LexicalCategory::Verb => &VERBS,
            LexicalCategory::Conjunction => &CONJUNCTIONS,
            LexicalCategory::Pronoun => &PRONOUNS,
            LexicalCategory::Preposition => &PREPOSITIONS,
            LexicalCategory::Adverb => &ADVERBS,
            LexicalCategory::Noun => &NOUNS,
            LexicalCategory::Truncation => &TRUNCATIONS,
            LexicalCategory::Letter => &LETTERS,
            LexicalCategory::MusicalNote => &MUSICAL_NOTES,
            LexicalCategory::OtherCogeminant => &OTHER_COGEMINANT,
            LexicalCategory::Pregeminant => &PREGEMINANT,
            LexicalCategory::NonCogeminant => &NON_COGEMINANT,
            LexicalCategory::NonCogeminantFallingDiphthong => &NON_COGEMINANT_FALLING_DIPHTHONGS,
        }
    }

    /// True for the lists whose members trigger gemination of the next word.
    pub fn is_cogeminant_list(self) -> bool {
        !matches!(
            self,
            LexicalCategory::Pregeminant
                | LexicalCategory::NonCogeminant
                | LexicalCategory::NonCogeminantFallingDiphthong
        )
    }

    pub fn contains(self, normalized: &str) -> bool {
        self.words().contains(normalized)
    }
}

/// Normalize a word for lookup: NFC, lowercase, punctuation stripped.
pub fn clean_word(raw: &str) -> String {
    raw.nfc()
        .flat_map(char::to_lowercase)
        .filter(|c| !STRIPPED.contains(c))
        .collect()
}

/// Every list `normalized` belongs to, in declaration order.
pub fn categories(normalized: &str) -> Vec<LexicalCategory> {
    LexicalCategory::ALL
        .iter()
        .copied()
        .filter(|c| c.contains(normalized))
        .collect()
}

/// Ends in an accented vowel (parola tronca).
pub fn is_oxytone(normalized: &str) -> bool {
    normalized
        .chars()
        .last()
        .map_or(false, |c| OXYTONE_FINALS.contains(&c))
}

/// Ends in a plain or accented vowel.
pub fn ends_in_vowel(normalized: &str) -> bool {
    normalized
        .chars()
        .last()
        .map_or(false, |c| VOWELS.contains(&c.to_lowercase().next().unwrap_or(c)))
}

/// Starts with a plain or accented vowel.
pub fn starts_with_vowel(word: &str) -> bool {
    word.nfc()
        .next()
        .map_or(false, |c| c.to_lowercase().any(|l| VOWELS.contains(&l)))
}

pub fn is_pregeminant(normalized: &str) -> bool {
    PREGEMINANT.contains(normalized)
}

fn in_inclusion_list(normalized: &str) -> bool {
    LexicalCategory::ALL
        .iter()
        .any(|c| c.is_cogeminant_list() && c.contains(normalized))
}

/// Whether `normalized` triggers gemination of the following word.
///
/// Priority: exclusion list, then falling-diphthong exceptions, then the
/// inclusion lists, then the oxytone pattern.
pub fn is_cogeminant(normalized: &str) -> bool {
    if NON_COGEMINANT.contains(normalized) {
        return false;
    }
    if NON_COGEMINANT_FALLING_DIPHTHONGS.contains(normalized) {
        return false;
    }
    if in_inclusion_list(normalized) {
        return true;
    }
    is_oxytone(normalized)
}
