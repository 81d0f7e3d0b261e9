//! Toe Beans TUI - a terminal client for the Toe Beans social API.
//!
//! This library exposes modules for use in integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod input;
pub mod models;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod upload;
