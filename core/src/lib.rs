//! libipa-core
//!
//! Language-agnostic building blocks shared by the language crates
//! (libitaliano): tokenization and alignment of original text against its IPA
//! transcription, IPA scanning primitives, output segments and their
//! renderers, diagnostics, configuration, and the lazily initialized
//! boundary to the external IPA engine.
//!
//! Public API:
//! - `tokenize_words`, `tokenize_ipa`, `align_lines` - tokenizer/aligner
//! - `Segment`, `render_plain`, `render_html` - output rendering
//! - `Phonemizer`, `PhonemeEngine`, `EngineFactory` - IPA engine boundary
//! - `EspeakFactory` - espeak-ng backed engine
//! - `Config` - configuration shared by all language crates
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod text;
pub use text::{
    align_lines, count_words, is_numeric_token, normalize_input, pair_exact, pair_positional, split_lines,
    tokenize_ipa, tokenize_words, AlignedLine, IpaWord, Line, LineAlignment, Word, WordPair,
};

pub mod ipa;
pub use ipa::{geminated_onset, leading_unit, split_stress, units, IpaUnit, UnitScanner};

pub mod segment;
pub use segment::{escape_html, render_html, render_plain, HtmlStyle, Segment};

pub mod diagnostics;
pub use diagnostics::{report, Diagnostic, DiagnosticHook, Stage};

pub mod error;
pub use error::{EngineError, InitError, PhonemizeError};

pub mod phonemizer;
pub use phonemizer::{EngineFactory, EngineState, IpaPostProcessor, PhonemeEngine, Phonemizer};

pub mod espeak;
pub use espeak::{EspeakEngine, EspeakFactory};

/// Generic configuration for the core pipeline.
///
/// Language crates embed this (flattened) in their own config type and set
/// language defaults such as the voice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// espeak voice / language code passed to the engine
    pub voice: String,

    /// Binary used by the espeak engine
    pub espeak_command: String,

    /// Upper bound for one engine initialization attempt, in milliseconds
    pub init_timeout_ms: u64,

    // HTML rendering
    /// Inline element wrapping emphasized segments
    pub emphasis_tag: String,
    /// `class` attribute of the emphasis element; empty means no attribute
    pub emphasis_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            voice: "it".to_string(),
            espeak_command: "espeak-ng".to_string(),
            // first start of an engine can be slow
            init_timeout_ms: 15_000,
            emphasis_tag: "span".to_string(),
            emphasis_class: "ipa-emphasis".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn init_timeout(&self) -> Duration {
        Duration::from_millis(self.init_timeout_ms)
    }

    /// HTML emphasis element described by this config.
    pub fn html_style(&self) -> HtmlStyle {
        HtmlStyle {
            tag: self.emphasis_tag.clone(),
            class: (!self.emphasis_class.is_empty()).then(|| self.emphasis_class.clone()),
        }
    }
}
