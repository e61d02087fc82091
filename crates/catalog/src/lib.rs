pub mod types;

pub use types::{ContentItem, ItemKind};
