//! Daily Action Counter
//!
//! A bounded per-day counter with lazy reset: staleness is detected by
//! comparing a stored day index against the caller-supplied current day,
//! so no sweep ever runs and no clock is consulted here.

pub const ONE_DAY_MS: i64 = 86_400_000;

/// Convert a millisecond timestamp to an epoch-day index.
pub fn day_index(now_ms: i64) -> i32 {
    (now_ms / ONE_DAY_MS) as i32
}

/// Tracks how many bounded actions a user performed since the last daily reset.
///
/// `max_actions` bounds increments only; a direct `set_count` is deliberately
/// unclamped so the host's own "you're capped" report can be mirrored verbatim.
#[derive(Debug, Clone)]
pub struct DailyActionCounter {
    actions_performed: i32,
    last_day: i32,
    max_actions: i32,
    dirty: bool,
}

impl DailyActionCounter {
    /// Create a zeroed counter.
    pub fn new(max_actions: i32) -> Self {
        Self {
            actions_performed: 0,
            last_day: 0,
            max_actions,
            dirty: false,
        }
    }

    /// Parse a counter from its `"<actions>:<last_day>"` wire form.
    ///
    /// Malformed input (wrong field count, non-numeric parts) yields a zeroed
    /// counter rather than an error.
    pub fn from_config_string(max_actions: i32, s: &str) -> Self {
        let mut counter = Self::new(max_actions);
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 2 {
            if let (Ok(actions), Ok(day)) = (parts[0].parse(), parts[1].parse()) {
                counter.actions_performed = actions;
                counter.last_day = day;
            }
        }
        counter
    }

    /// Get the action count, treating any past day as zero.
    pub fn get_count(&self, today: i32) -> i32 {
        if today > self.last_day {
            return 0;
        }
        self.actions_performed
    }

    /// Unconditionally set the count and day stamp. Not clamped at `max_actions`.
    ///
    /// Returns the stored count.
    pub fn set_count(&mut self, today: i32, actions: i32) -> i32 {
        if today != self.last_day || actions != self.actions_performed {
            self.dirty = true;
        }
        self.last_day = today;
        self.actions_performed = actions;
        self.actions_performed
    }

    /// Add to the count, applying the lazy reset first.
    ///
    /// The guard checks only the previous count against `max_actions`, not the
    /// new total, so a single large add can land above the max. Once at or
    /// above the max, further adds are no-ops.
    ///
    /// Returns the stored count.
    pub fn add_count(&mut self, today: i32, actions: i32) -> i32 {
        let old_count = self.get_count(today);
        if old_count < self.max_actions {
            self.set_count(today, old_count + actions)
        } else {
            old_count
        }
    }

    pub fn last_day(&self) -> i32 {
        self.last_day
    }

    pub fn max_actions(&self) -> i32 {
        self.max_actions
    }

    /// Whether the counter changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Render the `"<actions>:<last_day>"` wire form.
    pub fn to_config_string(&self) -> String {
        format!("{}:{}", self.actions_performed, self.last_day)
    }
}
