//! CLI command implementations for carescore operations.
//!
//! Each submodule handles a specific command with its configuration
//! and execution logic.
//!
//! Available commands:
//! - **rate**: Run one rating batch over a facility snapshot
//! - **init**: Initialize a new carescore configuration file

pub mod init;
pub mod rate;

pub use init::init_config;
pub use rate::{rate_facilities, RateConfig};
