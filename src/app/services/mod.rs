//! Services layer - file access used by the shell.

pub mod file_filters;
pub mod file_io;
