//! Config Command
//!
//! Thin wrappers over the loader's config management helpers.

use crate::cli::output::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

pub fn show(as_json: bool) -> Result<()> {
    ConfigLoader::show_config(as_json)
}

pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let output = Output::new();
    let path = ConfigLoader::init_global(force)?;
    output.success(&format!("Config ready: {}", path.display()));
    Ok(())
}
