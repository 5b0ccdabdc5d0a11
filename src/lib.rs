//! # Reorder
//!
//! 補貨期限推算：資料載入、配置與命令列入口

pub mod cli;
pub mod config;
pub mod loader;
pub mod logging;

pub use config::{AppConfig, ConfigError};
pub use loader::{load_dir, DataSources};
