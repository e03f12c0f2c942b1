//! One run of the bot: generate, acquire an image, deliver

pub mod acquire;
pub mod deliver;
pub mod generate;
pub mod handler;

pub use handler::{Orchestrator, RunSettings};
