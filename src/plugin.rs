//! Reminder Plugin
//!
//! Event-driven glue over the counter registry: watches for the configured
//! shop window, counts purchases through inventory deltas, reconciles with the
//! game's own "limit reached" chat line, and reminds the player once per
//! in-game day how many purchases remain.
//!
//! Dispatch is plain and synchronous. The plugin takes no locks of its own;
//! a host that delivers events from more than one thread must wrap the plugin
//! in a mutex or route events through a single-threaded queue. Persistence
//! happens inside `handle_event`, so check-dirty / save / clear-dirty is one
//! region from the host's point of view.

use crate::config::ReminderConfig;
use crate::counter::{ONE_DAY_MS, day_index};
use crate::events::HostEvent;
use crate::host::{ConfigStore, Notifier};
use crate::registry::UserCounterRegistry;
use tracing::{debug, info};

/// Settings key under which the serialized counter map is persisted.
pub const PURCHASES_KEY: &str = "daily-shop-reminder.purchases";

/// Whether the player is currently in the watched shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Idle,
    InTargetShop {
        /// Held quantity of the watched item when last observed.
        last_seen: i32,
    },
}

pub struct DailyShopReminder<S: ConfigStore, N: Notifier> {
    config: ReminderConfig,
    store: S,
    notifier: N,
    registry: UserCounterRegistry,
    user: Option<String>,
    logging_in: bool,
    /// Set once a full day elapses mid-session; counting stays frozen until
    /// the player relogs, matching when the game applies its own reset.
    past_daily_reset: bool,
    /// Millisecond timestamp of the last daily reset, floored to the day.
    last_reset_ms: i64,
    watch: WatchState,
}

impl<S: ConfigStore, N: Notifier> DailyShopReminder<S, N> {
    /// Build the plugin, restoring persisted counters from the store.
    pub fn new(config: ReminderConfig, store: S, notifier: N) -> Self {
        let blob = store.load(PURCHASES_KEY).unwrap_or_else(|| "{}".to_string());
        let registry = UserCounterRegistry::from_serialized(config.max_daily_purchases, &blob);
        info!(users = registry.len(), "restored purchase counters");

        Self {
            config,
            store,
            notifier,
            registry,
            user: None,
            logging_in: true,
            past_daily_reset: false,
            last_reset_ms: 0,
            watch: WatchState::Idle,
        }
    }

    /// Dispatch one host event, persisting counters afterwards if anything
    /// changed.
    pub fn handle_event(&mut self, event: HostEvent) {
        debug!(event = event.event_type(), "dispatching host event");
        match event {
            HostEvent::SessionStarted { user } => {
                self.user = Some(user);
                self.logging_in = true;
            }
            HostEvent::SessionHopped => {
                self.logging_in = true;
                self.past_daily_reset = false;
                self.watch = WatchState::Idle;
            }
            HostEvent::Tick { now_ms } => self.on_tick(now_ms),
            HostEvent::ShopOpened { title, items_held } => self.on_shop_opened(&title, items_held),
            HostEvent::ShopClosed => self.watch = WatchState::Idle,
            HostEvent::InventoryChanged { items_held } => self.on_inventory_changed(items_held),
            HostEvent::ChatLine { text } => self.on_chat_line(&text),
        }
        self.persist_if_dirty();
    }

    /// Counters keyed by user, mainly for host-side inspection.
    pub fn registry(&self) -> &UserCounterRegistry {
        &self.registry
    }

    fn on_tick(&mut self, now_ms: i64) {
        let daily_reset = !self.logging_in && now_ms - self.last_reset_ms > ONE_DAY_MS;
        if daily_reset {
            self.past_daily_reset = true;
        }

        if daily_reset || self.logging_in {
            // Round down to the nearest day
            self.last_reset_ms = now_ms - now_ms % ONE_DAY_MS;
            self.logging_in = false;

            if self.config.enabled {
                self.send_reminder(day_index(now_ms));
            }
        }
    }

    fn on_shop_opened(&mut self, title: &str, items_held: i32) {
        if title.contains(&self.config.shop_title) {
            self.watch = WatchState::InTargetShop {
                last_seen: items_held,
            };
            debug!(items_held, "entered watched shop");
        }
    }

    fn on_inventory_changed(&mut self, items_held: i32) {
        if self.past_daily_reset {
            return;
        }
        let WatchState::InTargetShop { last_seen } = self.watch else {
            return;
        };

        if items_held > last_seen {
            let today = self.current_day();
            if let Some(user) = self.user.as_deref() {
                self.registry.add_count(user, today, items_held - last_seen);
            }
        }
        self.watch = WatchState::InTargetShop {
            last_seen: items_held,
        };
    }

    fn on_chat_line(&mut self, text: &str) {
        if self.past_daily_reset || !matches!(self.watch, WatchState::InTargetShop { .. }) {
            return;
        }
        if text != self.config.capped_chat_line {
            return;
        }
        let Some(user) = self.user.as_deref() else {
            return;
        };

        // The game says the limit is hit; mirror that verbatim. Direct set is
        // deliberately unclamped, and skipped if we already recorded more.
        let today = self.current_day();
        let max = self.config.max_daily_purchases;
        if self.registry.get_or_create(user, today).get_count(today) < max {
            self.registry.set_count(user, today, max);
        }
    }

    /// Notify the player how many purchases remain today, if any.
    fn send_reminder(&mut self, today: i32) {
        let Some(user) = self.user.as_deref() else {
            return;
        };

        // Read-only peek: a stale or absent entry counts as zero bought.
        let bought = self
            .registry
            .peek(user, today)
            .map_or(0, |counter| counter.get_count(today));
        let remaining = self.config.max_daily_purchases - bought;
        if remaining > 0 {
            let line = self.config.format_reminder(remaining);
            self.notifier.notify(&line);
            info!(user = %user, remaining, "sent daily purchase reminder");
        }
    }

    /// Day index for in-shop mutations, anchored to the session's last reset.
    fn current_day(&self) -> i32 {
        day_index(self.last_reset_ms)
    }

    fn persist_if_dirty(&mut self) {
        if self.registry.is_dirty() {
            let blob = self.registry.to_serialized();
            self.store.save(PURCHASES_KEY, &blob);
            self.registry.clear_dirty();
            debug!("persisted purchase counters");
        }
    }
}
