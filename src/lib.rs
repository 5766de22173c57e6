//! `ops-forecast` library crate.
//!
//! The binary (`opsf`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future daemon/batch runners, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod harmonize;
pub mod io;
pub mod report;
