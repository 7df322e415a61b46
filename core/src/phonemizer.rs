//! Boundary to the external text → IPA engine.
//!
//! Engines are expensive to bring up, so `Phonemizer` initializes lazily and
//! at most once at a time: the first caller starts an attempt, every
//! concurrent caller awaits the same shared future, and the attempt is
//! bounded by a timeout. A failed attempt puts the phonemizer back into the
//! uninitialized state so the next call retries from scratch.
//!
//! ```text
//! Uninitialized --first call--> Initializing --ok--> Ready
//!       ^                            |
//!       +-------- error/timeout -----+
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::error::{EngineError, InitError, PhonemizeError};
use crate::ipa::clean_engine_output;
use crate::text::normalize_input;

/// An initialized engine.
#[async_trait]
pub trait PhonemeEngine: Send + Sync + 'static {
    /// Transcribe non-blank text to IPA.
    async fn phonemize(&self, text: &str) -> Result<String, EngineError>;

    /// Whether concurrent `phonemize` calls are safe. Calls to engines that
    /// return false are queued one at a time.
    fn is_reentrant(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Builds an engine; invoked lazily by `Phonemizer`.
#[async_trait]
pub trait EngineFactory: Send + Sync + 'static {
    type Engine: PhonemeEngine;

    async fn initialize(&self) -> Result<Self::Engine, EngineError>;
}

/// Language-specific rewriting applied to fresh engine output.
pub trait IpaPostProcessor: Send + Sync {
    fn post_process(&self, original: &str, ipa: &str) -> String;
}

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Ready,
}

type InitFuture<E> = Shared<BoxFuture<'static, Result<Arc<E>, InitError>>>;

enum InitState<E> {
    Uninitialized,
    Initializing { generation: u64, pending: InitFuture<E> },
    Ready(Arc<E>),
}

/// Lazily initialized, memoized engine wrapper.
pub struct Phonemizer<F: EngineFactory> {
    factory: Arc<F>,
    state: Mutex<InitState<F::Engine>>,
    generation: AtomicU64,
    init_timeout: Duration,
    call_gate: Mutex<()>,
    post_processor: Option<Arc<dyn IpaPostProcessor>>,
}

impl<F: EngineFactory> Phonemizer<F> {
    pub fn new(factory: F, init_timeout: Duration) -> Self {
        Self {
            factory: Arc::new(factory),
            state: Mutex::new(InitState::Uninitialized),
            generation: AtomicU64::new(0),
            init_timeout,
            call_gate: Mutex::new(()),
            post_processor: None,
        }
    }

    /// Apply `post_processor` to every successful transcription.
    pub fn with_post_processor(mut self, post_processor: Arc<dyn IpaPostProcessor>) -> Self {
        self.post_processor = Some(post_processor);
        self
    }

    pub fn init_timeout(&self) -> Duration {
        self.init_timeout
    }

    pub async fn state(&self) -> EngineState {
        match &*self.state.lock().await {
            InitState::Uninitialized => EngineState::Uninitialized,
            InitState::Initializing { .. } => EngineState::Initializing,
            InitState::Ready(_) => EngineState::Ready,
        }
    }

    /// Drop the engine (or forget an in-flight attempt) so the next call
    /// initializes again.
    pub async fn reset(&self) {
        *self.state.lock().await = InitState::Uninitialized;
    }

    /// Warm the engine up ahead of the first `phonemize` call.
    pub async fn initialize(&self) -> Result<(), InitError> {
        self.engine().await.map(|_| ())
    }

    /// Transcribe `text`.
    ///
    /// Never fails: blank input yields `""`, any failure yields the sentinel
    /// `[Error: ...]`. Input is trimmed and NFC-normalized first.
    pub async fn phonemize(&self, text: &str) -> String {
        let cleaned = normalize_input(text);
        if cleaned.is_empty() {
            return String::new();
        }

        match self.try_phonemize(&cleaned).await {
            Ok(ipa) => ipa,
            Err(err) => {
                tracing::error!(error = %err, "phonemization failed");
                err.sentinel()
            }
        }
    }

    /// Like `phonemize` but exposes the failure. `text` should already have
    /// gone through `normalize_input`.
    pub async fn try_phonemize(&self, text: &str) -> Result<String, PhonemizeError> {
        let engine = self.engine().await?;

        let raw = if engine.is_reentrant() {
            engine.phonemize(text).await?
        } else {
            let _turn = self.call_gate.lock().await;
            engine.phonemize(text).await?
        };

        let ipa = clean_engine_output(&raw);
        Ok(match &self.post_processor {
            Some(post) => post.post_process(text, &ipa),
            None => ipa,
        })
    }

    async fn engine(&self) -> Result<Arc<F::Engine>, InitError> {
        let (generation, pending) = {
            let mut state = self.state.lock().await;
            match &*state {
                InitState::Ready(engine) => return Ok(engine.clone()),
                InitState::Initializing { generation, pending } => (*generation, pending.clone()),
                InitState::Uninitialized => {
                    let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                    let pending = self.start_attempt(generation);
                    *state = InitState::Initializing {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let result = pending.await;

        let mut state = self.state.lock().await;
        let current = matches!(
            &*state,
            InitState::Initializing { generation: g, .. } if *g == generation
        );
        match &result {
            Ok(engine) if current => {
                tracing::info!(engine = engine.name(), generation, "phoneme engine ready");
                *state = InitState::Ready(engine.clone());
            }
            Err(err) if current => {
                tracing::warn!(error = %err, generation, "phoneme engine initialization failed, will retry on next call");
                *state = InitState::Uninitialized;
            }
            _ => {}
        }
        result
    }

    fn start_attempt(&self, generation: u64) -> InitFuture<F::Engine> {
        let factory = self.factory.clone();
        let timeout = self.init_timeout;
        tracing::debug!(generation, ?timeout, "initializing phoneme engine");

        async move {
            match tokio::time::timeout(timeout, factory.initialize()).await {
                Ok(Ok(engine)) => Ok(Arc::new(engine)),
                Ok(Err(err)) => Err(InitError::Engine(err.to_string())),
                Err(_) => Err(InitError::Timeout(timeout)),
            }
        }
        .boxed()
        .shared()
    }
}
