//! Host Event Types
//!
//! Signals delivered by the host client. The plugin is a plain synchronous
//! dispatcher over these; the host is responsible for serializing delivery
//! (see [`crate::plugin`]).

/// Events the host delivers to the reminder plugin.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// A session started or resumed for the given user.
    SessionStarted {
        /// Stable, case-sensitive username for the active session.
        user: String,
    },

    /// The player hopped worlds or logged out; session state resets.
    SessionHopped,

    /// Periodic tick with the host's current wall-clock time.
    Tick { now_ms: i64 },

    /// A shop window became visible.
    ShopOpened {
        /// Title text of the shop window.
        title: String,
        /// How many of the watched item the player currently holds.
        items_held: i32,
    },

    /// The shop window closed.
    ShopClosed,

    /// The player's held quantity of the watched item changed.
    InventoryChanged { items_held: i32 },

    /// A game chat line was printed.
    ChatLine { text: String },
}

impl HostEvent {
    /// Get event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            HostEvent::SessionStarted { .. } => "session_started",
            HostEvent::SessionHopped => "session_hopped",
            HostEvent::Tick { .. } => "tick",
            HostEvent::ShopOpened { .. } => "shop_opened",
            HostEvent::ShopClosed => "shop_closed",
            HostEvent::InventoryChanged { .. } => "inventory_changed",
            HostEvent::ChatLine { .. } => "chat_line",
        }
    }
}
