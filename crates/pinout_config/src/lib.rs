//! Parsing and validation of `pinout.toml` board selection files.
//!
//! A build selects a board, a variant and a toolchain, and may add resource
//! requests and period constraints on top of the board defaults.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
