//! Resource scheduler CLI library.
//!
//! This crate provides the command-line interface for the scheduler. All
//! scheduling decisions live in `sked-db` and `sked-core`; the commands here
//! are thin adapters that parse arguments, call the engine, and format the
//! results.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EventAction, ResourceAction};
pub use config::Config;
