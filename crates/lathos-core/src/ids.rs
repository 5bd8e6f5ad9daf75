//! Identifier generation port.
//!
//! Errors carry an opaque identifier that callers can quote back when
//! reporting a problem. The source is injected so tests can use
//! deterministic values.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Produces unique identifiers for error instances.
///
/// Implementations are shared across threads.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs, the default source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, numbered from 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_uuid_generator_generates_unique_ids() {
        let ids = UuidGenerator;

        let id1 = ids.generate();
        let id2 = ids.generate();

        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(&id1).is_ok());
    }

    #[test]
    fn test_sequential_generator_is_deterministic() {
        let ids = SequentialIdGenerator::new("err");

        assert_eq!(ids.generate(), "err-1");
        assert_eq!(ids.generate(), "err-2");
        assert_eq!(ids.generate(), "err-3");
    }

    #[test]
    fn test_sequential_generator_across_threads() {
        let ids = Arc::new(SequentialIdGenerator::new("t"));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..25).map(|_| ids.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 100);
    }
}
