//! Prompt fingerprint cache.
//!
//! Collapses duplicate generation prompts within a process lifetime: the
//! same normalized prompt maps to the asset URL produced the first time.
//! Eviction is strict insertion order (oldest-inserted first), not LRU:
//! a hit does not refresh recency. The cache exists to absorb duplicate
//! requests within a burst, not to maximize long-term hit rate.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

/// Deterministic fingerprint of a normalized prompt.
///
/// Two prompts with the same fingerprint are treated as requesting the
/// same artifact. Collisions would surface as a false-positive cache hit;
/// with a full SHA-256 digest that is tolerated as theoretical.
pub fn fingerprint(prompt: &str) -> String {
    let normalized = prompt
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

struct CacheInner {
    entries: HashMap<String, String>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
}

/// Bounded fingerprint-to-URL cache, shared across image workers.
///
/// All state sits behind one mutex; `get`/`put` never hold it across an
/// await point, so concurrent workers from one or several campaign runs
/// serialize briefly and cannot corrupt the eviction order.
pub struct PromptCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl PromptCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Look up a fingerprint. Does not refresh eviction position.
    pub fn get(&self, fingerprint: &str) -> Option<String> {
        let inner = self.inner.lock().expect("prompt cache poisoned");
        inner.entries.get(fingerprint).cloned()
    }

    /// Insert a fingerprint. Evicts the oldest-inserted entry at capacity.
    /// Re-inserting an existing key updates the value in place without
    /// changing its eviction position.
    pub fn put(&self, fingerprint: impl Into<String>, url: impl Into<String>) {
        let fingerprint = fingerprint.into();
        let mut inner = self.inner.lock().expect("prompt cache poisoned");

        if inner.entries.contains_key(&fingerprint) {
            inner.entries.insert(fingerprint, url.into());
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }

        inner.order.push_back(fingerprint.clone());
        inner.entries.insert(fingerprint, url.into());
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("prompt cache poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
