//! tapdex-ticker — the cooperative scheduler for a panel.
//!
//! The engine owns no timer; a [`Ticker`] drives it. It counts whole
//! seconds toward a trigger interval, fires a callback when the
//! interval elapses, and exposes the remaining-seconds countdown so a
//! display surface can render "next update in MM:SS". Pausing freezes
//! the countdown; ticks are skipped, not queued.

pub mod ticker;

pub use ticker::{Ticker, format_countdown};
