//! Daily Shop Reminder
//!
//! A game-client add-on that watches a limited-stock shop and reminds the
//! player, once per in-game day, how many items they can still purchase.
//! The core is a per-user bounded counter with day-granularity lazy reset
//! ([`DailyActionCounter`] / [`UserCounterRegistry`]); [`DailyShopReminder`]
//! is the event-handler glue the host drives.
//!
//! Day indices are plain integers (elapsed 24h periods since the epoch),
//! always computed by the caller, so everything here is deterministic under
//! synthetic time.

pub mod config;
pub mod counter;
pub mod events;
pub mod host;
pub mod plugin;
pub mod registry;

pub use config::{ReminderConfig, load_config, save_config};
pub use counter::{DailyActionCounter, ONE_DAY_MS, day_index};
pub use events::HostEvent;
pub use host::{Clock, ConfigStore, FileConfigStore, Notifier, SystemClock};
pub use plugin::{DailyShopReminder, PURCHASES_KEY};
pub use registry::UserCounterRegistry;
