//! Application layer command/query handlers, one per use case.

pub mod billing;
pub mod catalog;
pub mod forum;
pub mod srs;
