//! metadv - Resolve metadata annotations into Data Vault artifacts
//!
//! metadv reads a declarative mapping from flat source columns to a
//! conceptual graph of entities, relations, and attributes, and resolves it
//! into the naming, grouping, and key-derivation structures needed to emit
//! stage, hub, link, and satellite models.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Load → Normalize → Context → Validate → Gate → Resolve
//! - [`core`] - Domain types, configuration, normalization, naming, graph context
//! - [`rules`] - Validation rules and their registry
//! - [`resolve`] - Stage derivation and hub/link/satellite grouping
//! - [`render`] - Renderers turning a resolved model into text
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! metadv maintains the following invariants:
//!
//! 1. Any accepted annotation generation yields the same canonical connections
//! 2. Stage hash keys and link foreign keys come from the same role slots
//! 3. Resolution never runs when validation reports an error
//! 4. Output ordering depends only on declaration order in the document

pub mod cli;
pub mod core;
pub mod engine;
pub mod render;
pub mod resolve;
pub mod rules;
pub mod ui;
