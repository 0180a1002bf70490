//! tapdex-session — a running price panel.
//!
//! A [`PanelSession`] owns the item collection for one panel: it is
//! initialized once from a catalog plus a rule table, mutated only
//! through [`PanelSession::record_sale`] and [`PanelSession::reprice`],
//! and replaced wholesale on [`PanelSession::reset`]. The engine
//! beneath it is value-in/value-out; the session is the single-writer
//! boundary callers must serialize behind.

pub mod error;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use session::{BoardRow, PanelSession};
