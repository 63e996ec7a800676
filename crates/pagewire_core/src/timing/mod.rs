//! Rate-limiting wrappers over callbacks.
//!
//! # Responsibility
//! - Provide `debounce` (run once after calls go quiet) and `throttle`
//!   (run at most once per window) on top of any `Scheduler`.
//!
//! # Invariants
//! - Wrappers never touch document state; the scheduler is their only
//!   dependency.
//! - Wrapped callbacks run on the scheduler's thread, never concurrently.

pub mod debounce;
pub mod throttle;

pub use debounce::{debounce, Debounced};
pub use throttle::{throttle, Throttled};
