//! Registry of deprecation notices that have already been shown.

use crate::DeprecationRecord;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

static GLOBAL_REGISTRY: Lazy<Arc<DeprecationRegistry>> =
    Lazy::new(|| Arc::new(DeprecationRegistry::new()));

/// Set of records that have already produced a warning.
///
/// Entries are never removed. Cardinality is bounded by the number of
/// distinct deprecation sites in the program.
#[derive(Debug, Default)]
pub struct DeprecationRegistry {
    seen: Mutex<HashSet<DeprecationRecord>>,
}

impl DeprecationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry shared by the global emitter.
    pub fn global() -> Arc<DeprecationRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Record `record`, returning `true` if it was not seen before.
    ///
    /// Check and insert happen under one lock, so exactly one caller wins.
    pub fn insert(&self, record: &DeprecationRecord) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(record) {
            return false;
        }
        seen.insert(record.clone())
    }

    pub fn contains(&self, record: &DeprecationRecord) -> bool {
        self.seen.lock().contains(record)
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }

    /// Snapshot of every record seen so far, in no particular order.
    pub fn records(&self) -> Vec<DeprecationRecord> {
        self.seen.lock().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeprecatedType;
    use std::thread;

    fn record(name: &str) -> DeprecationRecord {
        DeprecationRecord::new("1.0", DeprecatedType::Function, name)
    }

    #[test]
    fn test_insert_once() {
        let registry = DeprecationRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.insert(&record("a")));
        assert!(!registry.insert(&record("a")));
        assert!(registry.insert(&record("b")));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&record("a")));
        assert!(!registry.contains(&record("c")));
    }

    #[test]
    fn test_concurrent_insert_single_winner() {
        let registry = Arc::new(DeprecationRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.insert(&record("shared")))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(registry.records(), vec![record("shared")]);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&DeprecationRegistry::global(), &DeprecationRegistry::global()));
    }
}
