pub mod environment;
pub mod terminal;
pub mod timestamps;

pub use environment::{DATA_DIR_ENV, get_data_dir, resolve_data_dir};
pub use terminal::sanitize_line;
pub use timestamps::format_thread_time;
