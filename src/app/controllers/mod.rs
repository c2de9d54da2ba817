//! Controllers layer - orchestration of the tab collection.

pub mod tabs;
