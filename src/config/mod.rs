//! Configuration: on-disk locations and `settings.conf` parsing.

pub mod paths;
pub mod settings;

pub use paths::{config_dir, logs_dir, settings_path, storage_path};
pub use settings::{Settings, load_settings_from, parse_settings, settings};
