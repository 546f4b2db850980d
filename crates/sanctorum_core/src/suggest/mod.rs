//! Type-ahead suggestions for the saint search box.
//!
//! # Responsibility
//! - Debounce keystrokes and drop stale results (`debouncer`).
//! - Fetch candidate names from the model (`source`).
//! - Drive both for hosts that resolve requests inline (`pipeline`).

pub mod debouncer;
pub mod pipeline;
pub mod source;
