pub mod paths;
pub mod terminal;

pub use paths::{
    data_dir, default_config_path, default_history_path, format_path_with_tilde, log_dir,
};
pub use terminal::sanitize_for_display;
