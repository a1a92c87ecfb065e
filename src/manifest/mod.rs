//! Input classification and manifest-entry normalization.

mod builder;
mod classify;
mod labels;

pub use builder::{EntryBuilder, EntrySource, ManifestEntry, SourceFileSpec};
pub use classify::Category;
pub use labels::resolve_label;
