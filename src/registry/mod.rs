pub mod defaults;
pub mod tag_registry;

pub use defaults::default_tags;
pub use tag_registry::{TagRegistry, find_tag_by_name};
