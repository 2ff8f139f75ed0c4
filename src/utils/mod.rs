pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::get_config_dir;
pub use paths::{
    format_path_with_tilde, normalize_separators, resolve_attachment_path, validate_file_size,
};
pub use terminal::strip_ansi_codes;
