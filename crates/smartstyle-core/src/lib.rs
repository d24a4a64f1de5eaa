//! Smartstyle Core
//!
//! This crate provides core types, traits, and error definitions
//! shared by the smartstyle crates.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Scene`], [`SceneLike`] - Text-bearing units handed over by a host pipeline
//! - [`ContentKind`] - The kinds of units a step can apply to
//! - [`OptionValues`] - Resolved option values keyed by option id
//! - [`SmartStyleError`] - Error types

pub mod error;
pub mod types;

pub use error::{Result, SmartStyleError};
pub use types::{ContentKind, OptionValues, Scene, SceneLike};
