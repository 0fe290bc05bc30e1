//! Configuration module.

pub mod keybindings;
pub mod loader;
pub mod template;

pub use keybindings::KeyBindings;
pub use loader::{
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides,
    apply_env_overrides, default_config_path, default_log_path, load_config_file,
    load_config_with_precedence, merge_config,
};
pub use template::TemplateContext;
