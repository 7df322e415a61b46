// core/tests/phonemizer_lifecycle.rs
//
// Integration tests for the lazily initialized engine boundary.
//
// Tests cover:
// - a single shared initialization for concurrent callers
// - reset-on-failure and retry, including a stale failure after reset
// - the initialization timeout
// - blank input, output cleaning, post-processing and the error sentinel
// - queueing of non-reentrant engines

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use libipa_core::{
    EngineError, EngineFactory, EngineState, IpaPostProcessor, PhonemeEngine, Phonemizer,
};

// Engine that echoes its input with `_` separators, tracking concurrency.
struct EchoEngine {
    reentrant: bool,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl PhonemeEngine for EchoEngine {
    async fn phonemize(&self, text: &str) -> Result<String, EngineError> {
        if self.fail {
            return Err(EngineError::InvalidOutput("boom".to_string()));
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let separated: Vec<String> = text
            .split(' ')
            .map(|w| w.chars().map(String::from).collect::<Vec<_>>().join("_"))
            .collect();
        Ok(format!("{}  ", separated.join("   ")))
    }

    fn is_reentrant(&self) -> bool {
        self.reentrant
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

// Factory whose first `failures` attempts fail.
struct MockFactory {
    attempts: Arc<AtomicUsize>,
    failures: usize,
    init_delay: Duration,
    // overrides `init_delay` for the first attempt only
    first_delay: Option<Duration>,
    reentrant: bool,
    engine_fails: bool,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockFactory {
    fn new() -> Self {
        Self {
            attempts: Arc::new(AtomicUsize::new(0)),
            failures: 0,
            init_delay: Duration::from_millis(10),
            first_delay: None,
            reentrant: true,
            engine_fails: false,
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl EngineFactory for MockFactory {
    type Engine = EchoEngine;

    async fn initialize(&self) -> Result<EchoEngine, EngineError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        let delay = match (attempt, self.first_delay) {
            (0, Some(delay)) => delay,
            _ => self.init_delay,
        };
        tokio::time::sleep(delay).await;
        if attempt < self.failures {
            return Err(EngineError::Unavailable(format!("attempt {}", attempt)));
        }
        Ok(EchoEngine {
            reentrant: self.reentrant,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: self.max_in_flight.clone(),
            fail: self.engine_fails,
        })
    }
}

#[tokio::test]
async fn concurrent_callers_share_one_initialization() {
    let factory = MockFactory::new();
    let attempts = factory.attempts.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    assert_eq!(phonemizer.state().await, EngineState::Uninitialized);

    let calls = (0..8).map(|_| phonemizer.phonemize("casa"));
    let results = join_all(calls).await;

    assert!(results.iter().all(|ipa| ipa == "casa"));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(phonemizer.state().await, EngineState::Ready);
}

#[tokio::test]
async fn failed_initialization_is_retried() {
    let mut factory = MockFactory::new();
    factory.failures = 1;
    let attempts = factory.attempts.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    let first = phonemizer.phonemize("casa").await;
    assert!(first.starts_with("[Error:"), "got {}", first);
    assert!(first.contains("attempt 0"));
    assert_eq!(phonemizer.state().await, EngineState::Uninitialized);

    let second = phonemizer.phonemize("casa").await;
    assert_eq!(second, "casa");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn initialization_is_time_bounded() {
    let mut factory = MockFactory::new();
    factory.init_delay = Duration::from_secs(60);
    let phonemizer = Phonemizer::new(factory, Duration::from_millis(15_000));

    let out = phonemizer.phonemize("casa").await;
    assert!(out.starts_with("[Error:"));
    assert!(out.contains("timed out"));
    assert_eq!(phonemizer.state().await, EngineState::Uninitialized);
}

#[tokio::test]
async fn blank_input_skips_the_engine() {
    let factory = MockFactory::new();
    let attempts = factory.attempts.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    assert_eq!(phonemizer.phonemize("   \n ").await, "");
    assert_eq!(attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn output_is_cleaned_and_post_processed() {
    struct Upper;
    impl IpaPostProcessor for Upper {
        fn post_process(&self, original: &str, ipa: &str) -> String {
            assert_eq!(original, "la casa");
            ipa.to_uppercase()
        }
    }

    let phonemizer = Phonemizer::new(MockFactory::new(), Duration::from_secs(15))
        .with_post_processor(Arc::new(Upper));

    assert_eq!(phonemizer.phonemize("  la casa ").await, "LA CASA");
}

#[tokio::test]
async fn engine_errors_become_sentinels() {
    let mut factory = MockFactory::new();
    factory.engine_fails = true;
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    let out = phonemizer.phonemize("casa").await;
    assert_eq!(out, "[Error: invalid engine output: boom]");
    // the engine itself stays initialized
    assert_eq!(phonemizer.state().await, EngineState::Ready);
}

#[tokio::test]
async fn non_reentrant_engines_are_queued() {
    let mut factory = MockFactory::new();
    factory.reentrant = false;
    let max_in_flight = factory.max_in_flight.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    join_all((0..4).map(|_| phonemizer.phonemize("casa"))).await;
    assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reentrant_engines_run_concurrently() {
    let factory = MockFactory::new();
    let max_in_flight = factory.max_in_flight.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));
    phonemizer.initialize().await.unwrap();

    join_all((0..4).map(|_| phonemizer.phonemize("casa"))).await;
    assert!(max_in_flight.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn reset_forces_a_new_initialization() {
    let factory = MockFactory::new();
    let attempts = factory.attempts.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    phonemizer.initialize().await.unwrap();
    phonemizer.reset().await;
    assert_eq!(phonemizer.state().await, EngineState::Uninitialized);
    phonemizer.initialize().await.unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn stale_failure_does_not_undo_a_newer_initialization() {
    let mut factory = MockFactory::new();
    factory.failures = 1;
    factory.first_delay = Some(Duration::from_secs(5));
    let attempts = factory.attempts.clone();
    let phonemizer = Phonemizer::new(factory, Duration::from_secs(15));

    // first attempt: slow, then fails
    let stale = phonemizer.phonemize("casa");
    let fresh = async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(phonemizer.state().await, EngineState::Initializing);
        phonemizer.reset().await;
        // second attempt completes long before the first one fails
        let ipa = phonemizer.phonemize("casa").await;
        assert_eq!(phonemizer.state().await, EngineState::Ready);
        ipa
    };

    let (stale_out, fresh_out) = tokio::join!(stale, fresh);

    assert!(stale_out.starts_with("[Error:"), "got {}", stale_out);
    assert!(stale_out.contains("attempt 0"));
    assert_eq!(fresh_out, "casa");
    assert_eq!(phonemizer.state().await, EngineState::Ready);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
