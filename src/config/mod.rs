//! Configuration loading and management for the HR engine.
//!
//! This module provides functionality to load engine configuration from YAML
//! files: the monthly leave grant and the attendance settings.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Location timeout: {}s", config.attendance().location_timeout_secs);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceConfig, EngineConfig};
