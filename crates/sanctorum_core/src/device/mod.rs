//! Device features the host may or may not provide.
//!
//! # Responsibility
//! - Gate speech and share features on host-reported capabilities.
//! - Keep narration, voice capture and share payload state out of the UI.
//!
//! # Invariants
//! - A feature whose capability is missing is reported unavailable before
//!   any attempt is made.

pub mod capability;
pub mod narration;
pub mod share;
pub mod voice;
