//! Application layer orchestrating domain logic through ports.

pub mod handlers;
