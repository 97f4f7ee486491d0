//! Core library for the l10n string editor.
//! Flattens nested JSON string tables into editable dotted-key entries, groups
//! them for display, persists them between sessions and rebuilds nested JSON
//! on export.

pub mod config;
mod entry;
mod error;
pub mod flatten;
mod gui;
mod state;
pub mod statics;
pub mod store;
pub mod view;

pub use entry::{Collection, Entry};
pub use error::{EditorError, StoreError};
pub use flatten::{ExportOptions, flatten, parse_and_flatten, unflatten, unflatten_with};
pub use gui::run_gui;
pub use state::EditorState;
pub use view::{Section, group, labelize, sections, top_level_key};
