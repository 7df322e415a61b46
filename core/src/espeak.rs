//! espeak-ng engine.
//!
//! Runs the system `espeak-ng` binary to produce IPA. Initialization probes
//! the binary once (`--version`); each transcription is an independent
//! process, so the engine is reentrant.
//!
//! Requires espeak-ng to be installed:
//! - macOS: `brew install espeak-ng`
//! - Linux: `apt-get install espeak-ng`

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::EngineError;
use crate::ipa::TIE_BAR;
use crate::phonemizer::{EngineFactory, PhonemeEngine};

/// Creates `EspeakEngine`s for one voice.
#[derive(Debug, Clone)]
pub struct EspeakFactory {
    command: String,
    voice: String,
}

impl EspeakFactory {
    /// `command` is the binary to run (usually `espeak-ng`), `voice` the
    /// espeak voice/language code (`it`).
    pub fn new<C: Into<String>, V: Into<String>>(command: C, voice: V) -> Self {
        Self {
            command: command.into(),
            voice: voice.into(),
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        Self::new(config.espeak_command.clone(), config.voice.clone())
    }
}

#[async_trait]
impl EngineFactory for EspeakFactory {
    type Engine = EspeakEngine;

    async fn initialize(&self) -> Result<EspeakEngine, EngineError> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Unavailable(format!(
                "`{} --version` exited with {}",
                self.command, output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::info!(command = %self.command, voice = %self.voice, %version, "espeak-ng available");

        Ok(EspeakEngine {
            command: self.command.clone(),
            voice: self.voice.clone(),
        })
    }
}

/// A probed espeak-ng binary bound to a voice.
#[derive(Debug, Clone)]
pub struct EspeakEngine {
    command: String,
    voice: String,
}

impl EspeakEngine {
    fn args(&self) -> Vec<String> {
        vec![
            "-q".to_string(),
            "--ipa".to_string(),
            format!("--tie={}", TIE_BAR),
            "-v".to_string(),
            self.voice.clone(),
        ]
    }
}

#[async_trait]
impl PhonemeEngine for EspeakEngine {
    async fn phonemize(&self, text: &str) -> Result<String, EngineError> {
        let output = Command::new(&self.command)
            .args(self.args())
            .arg(text)
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map(|ipa| ipa.trim_end().to_string())
            .map_err(|e| EngineError::InvalidOutput(e.to_string()))
    }

    fn is_reentrant(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "espeak-ng"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_request_tied_ipa_for_voice() {
        let engine = EspeakEngine {
            command: "espeak-ng".to_string(),
            voice: "it".to_string(),
        };
        assert_eq!(engine.args(), vec!["-q", "--ipa", "--tie=\u{361}", "-v", "it"]);
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let factory = EspeakFactory::new("definitely-not-espeak-ng-binary", "it");
        match factory.initialize().await {
            Err(EngineError::Spawn { command, .. }) => {
                assert_eq!(command, "definitely-not-espeak-ng-binary")
            }
            other => panic!("expected spawn error, got {:?}", other.map(|_| ())),
        }
    }
}
