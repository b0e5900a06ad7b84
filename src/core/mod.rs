//! core
//!
//! Core domain types, schemas, and the pure stages of resolution.
//!
//! # Modules
//!
//! - [`types`] - Canonical model: Target, Source, Column, Connection
//! - [`config`] - Document location, schema, and package detection
//! - [`normalize`] - Annotation generations to canonical connections
//! - [`naming`] - Role slots, derived column names, artifact names
//! - [`graph`] - Read-only context shared by rules and resolvers
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Everything after loading is a pure function of the document
//! - All output ordering is deterministic

pub mod config;
pub mod graph;
pub mod naming;
pub mod normalize;
pub mod types;
