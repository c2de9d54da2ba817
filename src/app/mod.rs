//! Everything below the widgets. `state` ties the tab collection to the
//! single editor widget; the other modules know nothing about the window.

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;
