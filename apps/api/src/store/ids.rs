//! Identifier generation for list items.
//!
//! Injected into the store so id uniqueness never depends on call timing.
//! Production uses random UUIDs; tests use a deterministic counter.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier, never reused for the generator's lifetime.
    fn next_id(&self) -> String;
}

/// UUID v4 ids.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter ids ("1", "2", ...) for deterministic tests.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds {
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_id(), "2");
        assert_eq!(ids.next_id(), "3");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
