//! Landing-page access gate
//!
//! Two link clicks unlock the action button; the action starts a countdown
//! that ends in a persisted completion flag and a redirect.

pub mod machine;
pub mod session;

pub use machine::{AccessGate, Channel, GateEffect, GatePhase, status_message};
pub use session::{Boot, GateSession, is_completed, mark_completed};
