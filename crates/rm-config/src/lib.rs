//! Configuration and file management for rm-episodes
//!
//! This crate provides:
//! - File path utilities for config, cache and log files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Session persistence (selected characters)

pub mod app_config;
pub mod config_file;
pub mod paths;
pub mod session;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use paths::{app_config_path, log_dir, session_path};
pub use session::{Session, SessionData};
