//! panlog CLI library
//!
//! Argument definitions, command handlers and output rendering for the `panlog` binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
