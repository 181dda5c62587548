//! Core library for the Battlefield 6 Config Editor (BFCE).
//! Parses `Category.Key value` profile files into an ordered, editable document,
//! and exports them back to the same line format with round-trip guarantees.

mod cache;
mod config;
mod document;
mod error;
mod gui;
pub mod logging;
mod parser;
mod profile;
pub mod statics;

pub use cache::{CachedProfile, ProfileCache};
pub use config::AppConfig;
pub use document::{CategoryMap, CategorySelection, ConfigDocument, SettingEntry};
pub use error::ProfileError;
pub use gui::run_gui;
pub use parser::{Directive, LineKind, classify_line, parse};
pub use profile::{LineEnding, LoadedProfile, is_supported_file_name};
