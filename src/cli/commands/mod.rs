//! CLI Commands

pub mod analyze;
pub mod config;
pub mod doctor;
