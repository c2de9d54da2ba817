//! Plain data the editor works on: documents with their marks and undo
//! history, the theme, the settings file, and the UI message set.

pub mod document;
pub mod history;
pub mod messages;
pub mod settings;
pub mod style;
pub mod theme;
