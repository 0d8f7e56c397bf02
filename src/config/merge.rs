//! Layering defaults.

pub mod merge_policy;
