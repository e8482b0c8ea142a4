pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{default_config_path, default_history_path};
pub use paths::{expand_tilde, format_path_with_tilde, tracking_key};
