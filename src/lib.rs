//! Library entry for country-atlas exposing the listing pipeline, persistence
//! and service clients for the binary and integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod logic;
pub mod sources;
pub mod state;
pub mod util;
