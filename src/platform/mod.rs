//! Platform abstraction layer
//!
//! Handles the parts that depend on wall time:
//! - Scheduling the next tick (`clock`)
//! - Owning a round for its lifetime: input buffering, start/stop/restart
//!   (`session`)

pub mod clock;
pub mod session;

pub use clock::{RealtimeClock, Scheduler, VirtualClock};
pub use session::Session;
