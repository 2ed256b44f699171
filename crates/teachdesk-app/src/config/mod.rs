//! Configuration file parsing for TeachDesk
//!
//! Supports `<config_dir>/teachdesk/config.toml` with the sections
//! `[generation]`, `[defaults]`, `[credentials]`, `[storage]` and `[export]`.

pub mod settings;
pub mod types;

pub use settings::{
    config_dir, default_config_path, default_data_dir, init_config_file, load_settings,
    save_settings,
};
pub use types::*;
