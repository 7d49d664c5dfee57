//! Configuration management for toctoc.
//!
//! `KnockConfig` is what a run uses; `AppSettings` is the optional file it
//! starts from before command-line flags are applied.

mod knock;
mod settings;

pub use knock::{KnockConfig, DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_MS};
pub use settings::{AppSettings, Paths};
