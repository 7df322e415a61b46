//! Italian-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `libipa_core::Config` (flattened via serde)
//! - Whether raddoppiamento fonosintattico is applied to engine output
//! - Whether multi-line input is post-processed line by line
//!
//! # Example
//!
//! ```rust
//! use libitaliano::ItalianConfig;
//!
//! let config = ItalianConfig::default();
//! assert_eq!(config.base().voice, "it");
//! let base_config = config.into_base();
//! ```
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ItalianConfig {
    /// Base configuration fields (voice, engine binary, timeout, HTML style)
    #[serde(flatten)]
    pub base: libipa_core::Config,

    /// Apply raddoppiamento fonosintattico to fresh engine output
    pub raddoppiamento: bool,

    /// Post-process multi-line input per line when line counts align
    pub line_aware: bool,
}

impl Default for ItalianConfig {
    fn default() -> Self {
        let mut base = libipa_core::Config::default();
        base.voice = "it".to_string();

        Self {
            base,
            raddoppiamento: true,
            line_aware: true,
        }
    }
}

impl ItalianConfig {
    /// Convert this Italian config into the base config
    pub fn into_base(self) -> libipa_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libipa_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libipa_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_fields_parse() {
        let cfg = ItalianConfig::from_toml_str(
            "voice = \"it\"\ninit_timeout_ms = 2000\nraddoppiamento = false\n",
        )
        .unwrap();
        assert!(!cfg.raddoppiamento);
        assert!(cfg.line_aware);
        assert_eq!(cfg.base().init_timeout_ms, 2000);
        assert_eq!(cfg.base().espeak_command, "espeak-ng");
    }
}
