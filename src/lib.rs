//! Francês com Clara - Language Learning Platform Backend
//!
//! This crate implements the content catalog, spaced-repetition flashcards,
//! subscription billing and discussion forum behind a JSON REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
