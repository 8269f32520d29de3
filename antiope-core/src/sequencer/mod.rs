//! Screen sequencer
//!
//! The top-level display state machine: boot hold, clear-and-fetch,
//! display. Explicit, finite and tick-driven, with a single pending
//! timer slot and a generation guard against stale fetch results.

pub mod machine;
pub mod output;

pub use machine::{Phase, Sequencer, BOOT_HOLD_MS, CLEAR_HOLD_MS, PAGE_TURN_BUDGET_MS};
pub use output::{FetchRequest, Output, RenderRequest};
