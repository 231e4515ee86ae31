use std::sync::{Arc, Mutex, OnceLock};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generator;
use crate::models::MetricsSnapshot;

/// Process-lifetime memo for the generated snapshot.
///
/// The first successful `get` runs the generator and every later call hands
/// back the same `Arc`. There is no invalidation; a fresh snapshot needs a
/// fresh process (or a fresh cache).
pub struct SnapshotCache {
    config: GeneratorConfig,
    snapshot: OnceLock<Arc<MetricsSnapshot>>,
    init: Mutex<()>,
}

impl SnapshotCache {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            snapshot: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn is_populated(&self) -> bool {
        self.snapshot.get().is_some()
    }

    pub fn get(&self) -> Result<Arc<MetricsSnapshot>> {
        self.get_or_generate_with(|config| generator::generate_snapshot(config))
    }

    /// Like `get`, with the generation step supplied by the caller. The
    /// step runs at most once per successful population, even when several
    /// threads race on an empty cache.
    pub fn get_or_generate_with<F>(&self, generate: F) -> Result<Arc<MetricsSnapshot>>
    where
        F: FnOnce(&GeneratorConfig) -> Result<MetricsSnapshot>,
    {
        if let Some(snapshot) = self.snapshot.get() {
            tracing::debug!(snapshot_id = %snapshot.id, "snapshot cache hit");
            return Ok(Arc::clone(snapshot));
        }

        let _guard = self.init.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(Arc::clone(snapshot));
        }

        let fresh = Arc::new(generate(&self.config)?);
        let stored = self.snapshot.get_or_init(|| fresh);
        tracing::debug!(snapshot_id = %stored.id, "snapshot cache populated");
        Ok(Arc::clone(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seeded_cache() -> SnapshotCache {
        SnapshotCache::new(GeneratorConfig::default().with_seed(3))
    }

    #[test]
    fn repeated_fetches_return_the_same_snapshot() {
        let cache = seeded_cache();
        assert!(!cache.is_populated());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(cache.is_populated());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.id, second.id);
        assert_eq!(first.daily, second.daily);
    }

    #[test]
    fn generator_runs_once() {
        let cache = seeded_cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            cache
                .get_or_generate_with(|config| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    generator::generate_snapshot(config)
                })
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_generation_leaves_cache_empty() {
        let cache = SnapshotCache::new(GeneratorConfig::default().with_window_days(0));
        assert!(cache.get().is_err());
        assert!(!cache.is_populated());
    }

    #[test]
    fn concurrent_readers_observe_one_snapshot() {
        let cache = Arc::new(seeded_cache());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get().unwrap().id)
            })
            .collect();

        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
