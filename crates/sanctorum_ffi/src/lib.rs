//! Flutter-facing bindings for `sanctorum_core`.

pub mod api;
