//! Library exports for playerstore, shared between the binary and tests.

pub mod admin;
pub mod config;
pub mod handshake;
pub mod models;
pub mod preferences;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
