// libitaliano/src/phonemize.rs
//
// Italian phonemizer: espeak-ng with the Italian post-processing applied to
// every transcription.

use std::sync::Arc;

use libipa_core::diagnostics::DiagnosticHook;
use libipa_core::phonemizer::{EngineFactory, Phonemizer};
use libipa_core::EspeakFactory;

use crate::config::ItalianConfig;
use crate::postprocess::ItalianPostProcessor;

/// A phonemizer backed by the system espeak-ng binary.
pub fn italian_phonemizer(config: &ItalianConfig) -> Phonemizer<EspeakFactory> {
    with_italian_rules(EspeakFactory::from_config(config.base()), config, None)
}

/// Wrap any engine factory with the Italian post-processing from `config`.
pub fn with_italian_rules<F: EngineFactory>(
    factory: F,
    config: &ItalianConfig,
    hook: Option<DiagnosticHook>,
) -> Phonemizer<F> {
    let phonemizer = Phonemizer::new(factory, config.base().init_timeout());
    if !config.raddoppiamento {
        return phonemizer;
    }

    let mut post = ItalianPostProcessor::from_config(config);
    if let Some(hook) = hook {
        post = post.with_hook(hook);
    }
    phonemizer.with_post_processor(Arc::new(post))
}
