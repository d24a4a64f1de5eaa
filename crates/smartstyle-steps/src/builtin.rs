//! Built-in steps.
//!
//! This module provides:
//! - A list of all built-in steps
//! - Step metadata for listing
//! - Step factory functions

use crate::{replacer, SmartStyleReplacer, Step};
use smartstyle_core::{Result, SmartStyleError};

/// Get all built-in steps, in the order they run.
pub fn builtin_steps() -> Vec<Box<dyn Step>> {
    builtin_step_info()
        .iter()
        .filter_map(|info| create_step(info.name).ok())
        .collect()
}

/// Step metadata.
#[derive(Debug, Clone)]
pub struct StepInfo {
    /// Registry name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
}

/// Get information about all built-in steps.
pub fn builtin_step_info() -> Vec<StepInfo> {
    vec![StepInfo {
        name: replacer::STEP_NAME,
        description: "Wraps marker-prefixed lines into Pandoc custom-style fenced divs",
    }]
}

/// Create a step by name.
///
/// # Errors
///
/// [`SmartStyleError::UnknownStep`] if the name is not a built-in step.
pub fn create_step(name: &str) -> Result<Box<dyn Step>> {
    match name {
        replacer::STEP_NAME => Ok(Box::new(SmartStyleReplacer::new())),
        _ => Err(SmartStyleError::UnknownStep(name.to_string())),
    }
}
