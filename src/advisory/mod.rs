// ABOUTME: Optional advisory capability with caching, rate limiting and timeouts
// ABOUTME: Untrusted text responses are validated and degrade to "no suggestion"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Advisory Capability
//!
//! Goal inference, trade-off explanations and exercise substitution ranking may
//! consult an external advisor (typically a language model). The engine reaches
//! it through [`AdvisoryProvider`], a single call taking a task name, a prompt
//! and a cache key and returning text or nothing.
//!
//! The default is [`NoAdvisor`], which keeps generation fully deterministic.
//! [`GuardedAdvisor`] wraps a real provider with a content-hash cache, a
//! per-minute rate limit and a deadline; every failure becomes `None`.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use lru::LruCache;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::config::intelligence::AdvisoryConfig;

// Provider panics are contained with `catch_unwind`, which needs unwinding
#[cfg(panic = "abort")]
compile_error!("coachplan needs panic = \"unwind\": advisory provider panics must degrade to no suggestion");

/// Task name for primary-goal inference during intake
pub const TASK_GOAL_INFERENCE: &str = "goal_inference";
/// Task name for explaining a feasibility trade-off
pub const TASK_TRADE_OFF_EXPLANATION: &str = "trade_off_explanation";
/// Task name for ranking exercise substitutes
pub const TASK_EXERCISE_SUBSTITUTION: &str = "exercise_substitution";

/// External advisory collaborator
pub trait AdvisoryProvider: Send + Sync {
    /// Ask for a suggestion; `None` means "no suggestion"
    fn infer(&self, task: &str, prompt: &str, cache_key: &str) -> Option<String>;
}

impl<F> AdvisoryProvider for F
where
    F: Fn(&str, &str, &str) -> Option<String> + Send + Sync,
{
    fn infer(&self, task: &str, prompt: &str, cache_key: &str) -> Option<String> {
        self(task, prompt, cache_key)
    }
}

/// Advisor that never answers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvisor;

impl AdvisoryProvider for NoAdvisor {
    fn infer(&self, _task: &str, _prompt: &str, _cache_key: &str) -> Option<String> {
        None
    }
}

/// Content hash of a task and prompt, used as the cache key
#[must_use]
pub fn cache_key(task: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(task.as_bytes());
    hasher.update([0_u8]);
    hasher.update(prompt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Ask `advisor` about `prompt`, computing the cache key from the content
pub fn consult(advisor: &dyn AdvisoryProvider, task: &str, prompt: &str) -> Option<String> {
    let key = cache_key(task, prompt);
    advisor.infer(task, prompt, &key)
}

/// Index of the candidate the response names, if it names exactly one
///
/// The response is trimmed, unquoted and compared case-insensitively with
/// each candidate; anything else is rejected.
#[must_use]
pub fn pick_candidate(response: &str, candidates: &[&str]) -> Option<usize> {
    let normalized = normalize_choice(response);
    if normalized.is_empty() {
        return None;
    }
    candidates
        .iter()
        .position(|c| normalize_choice(c) == normalized)
}

fn normalize_choice(text: &str) -> String {
    text.trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.')
        .trim()
        .to_lowercase()
}

/// Sanitize a free-text explanation: trimmed, printable, bounded length
#[must_use]
pub fn sanitize_text(response: &str, max_chars: usize) -> Option<String> {
    let trimmed = response.trim();
    if trimmed.is_empty()
        || trimmed
            .chars()
            .any(|c| c.is_control() && c != '\n' && c != '\t')
    {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}

/// Sliding one-minute window of call timestamps
#[derive(Debug)]
struct RateWindow {
    calls: VecDeque<Instant>,
    limit: u32,
}

impl RateWindow {
    const WINDOW: Duration = Duration::from_secs(60);

    fn try_acquire(&mut self, now: Instant) -> bool {
        while self
            .calls
            .front()
            .is_some_and(|t| now.duration_since(*t) >= Self::WINDOW)
        {
            self.calls.pop_front();
        }
        if self.calls.len() >= self.limit as usize {
            return false;
        }
        self.calls.push_back(now);
        true
    }
}

/// Provider wrapper enforcing cache, rate limit and deadline
///
/// Calls run on a worker thread; a provider that overruns the deadline is
/// abandoned and its eventual answer discarded.
pub struct GuardedAdvisor {
    inner: Arc<dyn AdvisoryProvider>,
    cache: Mutex<LruCache<String, String>>,
    window: Mutex<RateWindow>,
    timeout: Duration,
}

impl GuardedAdvisor {
    /// Default cache capacity when config specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Wrap `inner` with the limits from `config`
    #[must_use]
    pub fn new(inner: Arc<dyn AdvisoryProvider>, config: &AdvisoryConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.cache_capacity).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            window: Mutex::new(RateWindow {
                calls: VecDeque::new(),
                limit: config.max_calls_per_minute,
            }),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    fn cached(&self, key: &str) -> Option<String> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn remember(&self, key: &str, value: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key.to_owned(), value.to_owned());
        }
    }

    fn acquire_slot(&self) -> bool {
        self.window
            .lock()
            .map(|mut w| w.try_acquire(Instant::now()))
            .unwrap_or(false)
    }

    fn call_with_deadline(&self, task: &str, prompt: &str, key: &str) -> Option<String> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let (task_owned, prompt_owned, key_owned) =
            (task.to_owned(), prompt.to_owned(), key.to_owned());

        let spawned = thread::Builder::new()
            .name("coachplan-advisory".to_owned())
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    inner.infer(&task_owned, &prompt_owned, &key_owned)
                }));
                // Receiver may be gone after a timeout
                let _ = tx.send(outcome.ok().flatten());
            });
        if let Err(e) = spawned {
            warn!(task, error = %e, "advisory worker could not be spawned");
            return None;
        }

        match rx.recv_timeout(self.timeout) {
            Ok(response) => response,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(task, timeout_ms = self.timeout.as_millis(), "advisory call timed out");
                None
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                warn!(task, "advisory worker exited without a response");
                None
            }
        }
    }
}

impl AdvisoryProvider for GuardedAdvisor {
    fn infer(&self, task: &str, prompt: &str, cache_key: &str) -> Option<String> {
        if let Some(hit) = self.cached(cache_key) {
            debug!(task, "advisory cache hit");
            return Some(hit);
        }
        if !self.acquire_slot() {
            warn!(task, "advisory rate limit reached, skipping call");
            return None;
        }
        let response = self.call_with_deadline(task, prompt, cache_key)?;
        self.remember(cache_key, &response);
        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> AdvisoryConfig {
        AdvisoryConfig {
            enabled: true,
            timeout_ms: 100,
            cache_capacity: 8,
            max_calls_per_minute: 2,
            max_response_chars: 20,
        }
    }

    #[test]
    fn test_pick_candidate_requires_exact_match() {
        let candidates = ["Box Squat", "Leg Press"];
        assert_eq!(pick_candidate("  leg press. ", &candidates), Some(1));
        assert_eq!(pick_candidate("\"Box Squat\"", &candidates), Some(0));
        assert_eq!(pick_candidate("I'd pick leg press", &candidates), None);
        assert_eq!(pick_candidate("", &candidates), None);
    }

    #[test]
    fn test_sanitize_text_rejects_control_characters() {
        assert_eq!(sanitize_text("ok\u{7}", 50), None);
        assert_eq!(sanitize_text("   ", 50), None);
        assert_eq!(
            sanitize_text(" a long explanation ", 6).as_deref(),
            Some("a long")
        );
    }

    #[test]
    fn test_cache_avoids_repeat_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let provider = move |_: &str, _: &str, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("answer".to_owned())
        };
        let guarded = GuardedAdvisor::new(Arc::new(provider), &config());
        let key = cache_key("task", "prompt");
        assert_eq!(guarded.infer("task", "prompt", &key).as_deref(), Some("answer"));
        assert_eq!(guarded.infer("task", "prompt", &key).as_deref(), Some("answer"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rate_limit_degrades_to_none() {
        let guarded = GuardedAdvisor::new(
            Arc::new(|_: &str, p: &str, _: &str| Some(p.to_owned())),
            &config(),
        );
        assert!(consult(&guarded, "t", "one").is_some());
        assert!(consult(&guarded, "t", "two").is_some());
        assert!(consult(&guarded, "t", "three").is_none());
    }

    #[test]
    fn test_timeout_degrades_to_none() {
        let slow = GuardedAdvisor::new(
            Arc::new(|_: &str, _: &str, _: &str| {
                thread::sleep(Duration::from_millis(500));
                Some("late".to_owned())
            }),
            &config(),
        );
        assert!(consult(&slow, "t", "p").is_none());
    }

    #[test]
    fn test_panic_degrades_to_none_and_is_not_cached() {
        assert!(cfg!(panic = "unwind"));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let panicking = GuardedAdvisor::new(
            Arc::new(move |_: &str, _: &str, _: &str| -> Option<String> {
                counter.fetch_add(1, Ordering::SeqCst);
                panic!("provider bug")
            }),
            &config(),
        );
        assert!(consult(&panicking, "t", "p").is_none());
        assert!(consult(&panicking, "t", "p").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_key_is_content_hash() {
        assert_eq!(cache_key("a", "b"), cache_key("a", "b"));
        assert_ne!(cache_key("a", "b"), cache_key("ab", ""));
        assert_eq!(cache_key("a", "b").len(), 64);
    }
}
