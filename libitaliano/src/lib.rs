//! libitaliano crate root
//!
//! Italian post-processing of IPA transcriptions built on the shared
//! `libipa-core` pieces: the lexical classifier, the gemination table, the
//! raddoppiamento fonosintattico engine, the simplified (hybrid spelling)
//! output builder, and an espeak-ng backed phonemizer that applies them.
//!
//! Public API exported here:
//! - `apply_raddoppiamento_fonosintattico` from `raddoppiamento`
//! - `build_simplified_output`, `build_simplified_output_html` from `simplified`
//! - `post_process_italian_ipa`, `ItalianPostProcessor` from `postprocess`
//! - `italian_phonemizer` from `phonemize`
//! - `ItalianConfig` from `config`

pub mod config;
pub mod gemination;
pub mod guide;
pub mod lexicon;
pub mod phonemize;
pub mod postprocess;
pub mod raddoppiamento;
pub mod simplified;

// Re-export the core types callers need alongside the Italian entry points.
pub use libipa_core::{
    render_html, render_plain, Diagnostic, DiagnosticHook, EngineState, HtmlStyle, Phonemizer,
    Segment, Stage,
};

pub use config::ItalianConfig;
pub use gemination::{geminate_ipa_word, is_geminable, spelling_compatible};
pub use guide::{lookup, render_guide, SymbolEntry, SYMBOL_GUIDE};
pub use lexicon::{clean_word, is_cogeminant, is_oxytone, is_pregeminant, LexicalCategory};
pub use phonemize::{italian_phonemizer, with_italian_rules};
pub use postprocess::{post_process_italian_ipa, ItalianPostProcessor};
pub use raddoppiamento::{
    apply_raddoppiamento_fonosintattico, apply_raddoppiamento_with, gemination_trigger, Trigger,
};
pub use simplified::{
    build_simplified_output, build_simplified_output_html, build_simplified_segments,
    SimplifiedBuilder,
};

/// Opening line of the Divina Commedia, used by the CLI `--example` flag.
pub const EXAMPLE_TEXT: &str = "Nel mezzo del cammin di nostra vita";
