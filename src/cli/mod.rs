//! Command-Line Interface

pub mod commands;
pub mod output;
