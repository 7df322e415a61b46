// libitaliano/src/guide.rs
//
// Reference table of the IPA symbols that appear in Italian transcriptions.

/// One symbol of the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    /// An Italian word using the symbol, with its transcription.
    pub example: &'static str,
}

const fn entry(symbol: &'static str, name: &'static str, example: &'static str) -> SymbolEntry {
    SymbolEntry {
        symbol,
        name,
        example,
    }
}

pub static SYMBOL_GUIDE: &[SymbolEntry] = &[
    entry("a", "open central vowel", "casa /ˈka.sa/"),
    entry("e", "close-mid front vowel", "perché /perˈke/"),
    entry("ɛ", "open-mid front vowel", "pèsca /ˈpɛs.ka/"),
    entry("i", "close front vowel", "vino /ˈvi.no/"),
    entry("o", "close-mid back vowel", "dopo /ˈdo.po/"),
    entry("ɔ", "open-mid back vowel", "porta /ˈpɔr.ta/"),
    entry("u", "close back vowel", "luna /ˈlu.na/"),
    entry("j", "palatal approximant", "ieri /ˈjɛ.ri/"),
    entry("w", "labio-velar approximant", "uomo /ˈwɔ.mo/"),
    entry("ʃ", "voiceless postalveolar fricative", "scena /ˈʃe.na/"),
    entry("ɲ", "palatal nasal", "gnocchi /ˈɲɔk.ki/"),
    entry("ʎ", "palatal lateral", "figlio /ˈfiʎ.ʎo/"),
    entry("t͡ʃ", "voiceless postalveolar affricate", "cena /ˈt͡ʃe.na/"),
    entry("d͡ʒ", "voiced postalveolar affricate", "giro /ˈd͡ʒi.ro/"),
    entry("t͡s", "voiceless alveolar affricate", "zio /ˈt͡sio/"),
    entry("d͡z", "voiced alveolar affricate", "zero /ˈd͡ze.ro/"),
    entry("ˈ", "primary stress, before the stressed syllable", "città /t͡ʃitˈtaː/"),
    entry("ː", "length mark, long vowel or geminate", "città /t͡ʃitˈtaː/"),
];

/// The guide entry for `symbol`.
pub fn lookup(symbol: &str) -> Option<&'static SymbolEntry> {
    SYMBOL_GUIDE.iter().find(|e| e.symbol == symbol)
}

/// The guide as an aligned text table.
pub fn render_guide() -> String {
    let width = SYMBOL_GUIDE
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for e in SYMBOL_GUIDE {
        let pad = 4usize.saturating_sub(e.symbol.chars().count());
        out.push_str(&format!(
            "{}{}  {:<width$}  {}\n",
            e.symbol,
            " ".repeat(pad),
            e.name,
            e.example,
            width = width
        ));
    }
    out
}
