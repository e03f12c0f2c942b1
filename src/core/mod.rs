//! Configuration and data shared across a run

pub mod config;
pub mod models;
