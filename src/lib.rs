// lpl library crate.
// Comment fetching, caching, view state, and the terminal UI.

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod state;
pub mod ui;
