// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod app;
pub mod config;
pub mod engine;
pub mod history;
pub mod presentation;
pub mod protocol;
pub mod roster;
pub mod stage;
pub mod theme;
pub mod tui;
