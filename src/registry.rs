//! User Counter Registry
//!
//! Owns one [`DailyActionCounter`] per username and tracks whether anything
//! changed since the last persist. Serializes to a JSON object of
//! `{username: "<actions>:<last_day>"}` strings; a corrupt or missing blob
//! degrades to an empty registry. The registry never performs I/O itself.

use crate::counter::DailyActionCounter;
use std::collections::HashMap;
use tracing::warn;

pub struct UserCounterRegistry {
    counters: HashMap<String, DailyActionCounter>,
    max_actions: i32,
    dirty: bool,
}

impl UserCounterRegistry {
    /// Create an empty registry whose counters all share `max_actions`.
    pub fn new(max_actions: i32) -> Self {
        Self {
            counters: HashMap::new(),
            max_actions,
            dirty: false,
        }
    }

    /// Rebuild a registry from its serialized JSON form.
    ///
    /// Any parse failure yields an empty registry; individual malformed
    /// counter strings degrade to zeroed counters.
    pub fn from_serialized(max_actions: i32, blob: &str) -> Self {
        let entries: HashMap<String, String> = match serde_json::from_str(blob) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding unreadable counter state: {}", e);
                HashMap::new()
            }
        };

        let counters = entries
            .into_iter()
            .map(|(user, s)| (user, DailyActionCounter::from_config_string(max_actions, &s)))
            .collect();

        Self {
            counters,
            max_actions,
            dirty: false,
        }
    }

    /// Serialize all counters to the JSON object form.
    pub fn to_serialized(&self) -> String {
        let entries: HashMap<&String, String> = self
            .counters
            .iter()
            .map(|(user, counter)| (user, counter.to_config_string()))
            .collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the counter for `user`, creating a fresh zeroed one when the user
    /// is unknown or their stored entry predates `today`.
    pub fn get_or_create(&mut self, user: &str, today: i32) -> &DailyActionCounter {
        if self.is_missing_or_stale(user, today) {
            return self.set_count(user, today, 0);
        }
        let max = self.max_actions;
        self.counters
            .entry(user.to_string())
            .or_insert_with(|| DailyActionCounter::new(max))
    }

    fn is_missing_or_stale(&self, user: &str, today: i32) -> bool {
        match self.counters.get(user) {
            Some(counter) => today > counter.last_day(),
            None => true,
        }
    }

    /// Read-only lookup: `None` when the user is unknown or their entry is
    /// stale. Never creates state.
    pub fn peek(&self, user: &str, today: i32) -> Option<&DailyActionCounter> {
        self.counters
            .get(user)
            .filter(|counter| today <= counter.last_day())
    }

    /// Overwrite (or create) the counter for `user`. Marks the registry dirty.
    pub fn set_count(&mut self, user: &str, today: i32, actions: i32) -> &DailyActionCounter {
        let counter = self
            .counters
            .entry(user.to_string())
            .or_insert_with(|| DailyActionCounter::new(self.max_actions));
        counter.set_count(today, actions);
        self.dirty = true;
        counter
    }

    /// Add to the counter for `user`, creating it first if missing or stale.
    /// Marks the registry dirty only if the underlying counter changed.
    pub fn add_count(&mut self, user: &str, today: i32, actions: i32) -> &DailyActionCounter {
        if self.is_missing_or_stale(user, today) {
            self.set_count(user, today, 0);
        }
        let max = self.max_actions;
        let counter = self
            .counters
            .entry(user.to_string())
            .or_insert_with(|| DailyActionCounter::new(max));
        counter.add_count(today, actions);
        if counter.is_dirty() {
            self.dirty = true;
        }
        counter
    }

    /// Whether any counter changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful persist.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        for counter in self.counters.values_mut() {
            counter.clear_dirty();
        }
    }

    /// Number of tracked users.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_absent_user() {
        let mut registry = UserCounterRegistry::new(100);
        let counter = registry.get_or_create("alice", 10);
        assert_eq!(counter.get_count(10), 0);
        assert_eq!(counter.last_day(), 10);
        assert!(registry.is_dirty());
    }

    #[test]
    fn test_get_or_create_replaces_stale_entry() {
        let mut registry = UserCounterRegistry::new(100);
        registry.set_count("alice", 10, 60);
        registry.clear_dirty();

        let counter = registry.get_or_create("alice", 11);
        assert_eq!(counter.get_count(11), 0);
        assert_eq!(counter.last_day(), 11);
        assert!(registry.is_dirty());
    }

    #[test]
    fn test_get_or_create_keeps_fresh_entry() {
        let mut registry = UserCounterRegistry::new(100);
        registry.set_count("alice", 10, 60);
        registry.clear_dirty();

        let counter = registry.get_or_create("alice", 10);
        assert_eq!(counter.get_count(10), 60);
        assert!(!registry.is_dirty());
    }

    #[test]
    fn test_peek_never_creates() {
        let mut registry = UserCounterRegistry::new(100);
        assert!(registry.peek("alice", 10).is_none());

        registry.set_count("alice", 10, 5);
        assert_eq!(registry.peek("alice", 10).unwrap().get_count(10), 5);
        // Stale entry reads as absent
        assert!(registry.peek("alice", 11).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let mut registry = UserCounterRegistry::new(100);
        registry.set_count("Alice", 10, 5);
        assert!(registry.peek("alice", 10).is_none());
    }

    #[test]
    fn test_add_marks_dirty_only_on_change() {
        let mut registry = UserCounterRegistry::new(100);
        registry.set_count("alice", 10, 100);
        registry.clear_dirty();

        // Already at max: no-op, no dirty
        registry.add_count("alice", 10, 5);
        assert!(!registry.is_dirty());

        registry.set_count("alice", 10, 50);
        registry.clear_dirty();
        registry.add_count("alice", 10, 5);
        assert!(registry.is_dirty());
        assert_eq!(registry.peek("alice", 10).unwrap().get_count(10), 55);
    }

    #[test]
    fn test_add_creates_missing_user() {
        let mut registry = UserCounterRegistry::new(100);
        let counter = registry.add_count("bob", 7, 3);
        assert_eq!(counter.get_count(7), 3);
        assert!(registry.is_dirty());
    }

    #[test]
    fn test_serialized_round_trip() {
        let mut registry = UserCounterRegistry::new(100);
        registry.set_count("alice", 10, 60);
        registry.set_count("bob", 12, 100);

        let restored = UserCounterRegistry::from_serialized(100, &registry.to_serialized());
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.peek("alice", 10).unwrap().get_count(10), 60);
        assert_eq!(restored.peek("bob", 12).unwrap().get_count(12), 100);
        assert!(!restored.is_dirty());
    }

    #[test]
    fn test_malformed_blob_yields_empty() {
        for bad in ["not json", "[1,2,3]", "{\"alice\": 5}", ""] {
            let registry = UserCounterRegistry::from_serialized(100, bad);
            assert!(registry.is_empty(), "input {bad:?}");
            assert!(!registry.is_dirty());
        }
    }

    #[test]
    fn test_malformed_entry_degrades_to_zeroed() {
        let registry = UserCounterRegistry::from_serialized(100, r#"{"alice": "abc:xyz"}"#);
        assert_eq!(registry.len(), 1);
        assert!(registry.peek("alice", 5).is_none());
        assert_eq!(registry.peek("alice", 0).unwrap().get_count(0), 0);
    }

    #[test]
    fn test_clear_dirty_resets_counter_latches() {
        let mut registry = UserCounterRegistry::new(100);
        registry.set_count("alice", 10, 50);
        registry.clear_dirty();

        // A genuine change after persist must re-mark the registry
        registry.add_count("alice", 10, 1);
        assert!(registry.is_dirty());
    }
}
