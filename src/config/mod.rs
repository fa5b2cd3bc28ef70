// Configuration management module
// TOML configuration management and settings

pub mod interactive;
pub mod settings;

pub use interactive::{run_interactive_config, show_config};
pub use settings::{Config, ConfigError, IndexConfig};
