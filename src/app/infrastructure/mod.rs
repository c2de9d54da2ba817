//! Glue between the domain and the outside world: raw FLTK text access,
//! OS dark-mode probes, and the crate error type.

pub mod buffer;
pub mod error;
pub mod platform;
