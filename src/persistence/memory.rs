//! In-process score store
//!
//! Used by tests and by hosts that do not need scores to outlive the process.

use std::collections::HashMap;

use super::{ScoreStore, StoreError};

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_then_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("lightCycleHighScore").unwrap(), None);
        store.set("lightCycleHighScore", 31).unwrap();
        assert_eq!(store.get("lightCycleHighScore").unwrap(), Some(31));
        assert_eq!(MemoryStore::with_value("a", 3).get("a").unwrap(), Some(3));
    }
}
