//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All human-facing output goes through this module so quiet and debug
//! modes behave the same in every command.

pub mod output;
