//! Architecture enforcement tests.
//!
//! Everything after Load is pure: normalization, the graph context, the
//! rules, and resolution never touch the filesystem, the environment, or
//! the terminal. Commands reach the pipeline only through the engine entry
//! points. These tests ensure violations are caught in CI.
//!
//! # Test Categories
//!
//! 1. **Purity** - Pipeline modules must not perform I/O
//! 2. **Entry Points** - Commands must not build contexts or run rules directly
//! 3. **Rule Registration** - Every rule module is declared and registered

use std::fs;
use std::path::{Path, PathBuf};

/// Files that make up the pure part of the pipeline.
const PURE_FILES: &[&str] = &[
    "src/core/types.rs",
    "src/core/normalize.rs",
    "src/core/naming.rs",
    "src/core/graph.rs",
    "src/engine/health.rs",
    "src/engine/gate.rs",
];

/// Directories whose every file is part of the pure pipeline.
const PURE_DIRS: &[&str] = &["src/rules", "src/resolve"];

/// Tokens that indicate I/O.
const IO_TOKENS: &[&str] = &[
    "std::fs",
    "std::env",
    "std::io",
    "println!",
    "eprintln!",
    "print!(",
];

fn rust_files(dir: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|_| panic!("Failed to read {}", dir))
        .map(|entry| entry.expect("Failed to read entry").path())
        .filter(|path| path.extension().map(|e| e == "rs").unwrap_or(false))
        .collect();
    files.sort();
    files
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()))
}

// =============================================================================
// Purity
// =============================================================================

/// Verify that pipeline modules perform no I/O.
///
/// Logging through the `log` facade is allowed; the binary decides where it
/// goes.
#[test]
fn pipeline_modules_are_pure() {
    let mut files: Vec<PathBuf> = PURE_FILES.iter().map(PathBuf::from).collect();
    for dir in PURE_DIRS {
        files.extend(rust_files(dir));
    }

    let mut violations = Vec::new();
    for path in &files {
        let content = read(path);
        for token in IO_TOKENS {
            if content.contains(token) {
                violations.push(format!("{}: uses `{}`", path.display(), token));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Pipeline modules must not perform I/O:\n{}",
        violations.join("\n")
    );
}

// =============================================================================
// Entry Points
// =============================================================================

/// Verify that commands go through the engine.
///
/// Building a `GraphContext` or running a registry from a command would
/// skip the gate.
#[test]
fn commands_use_engine_entry_points() {
    let mut violations = Vec::new();

    for path in rust_files("src/cli/commands") {
        let content = read(&path);
        for token in ["GraphContext", "resolve::resolve(", "registry.run(", ".check(&"] {
            if content.contains(token) {
                violations.push(format!("{}: uses `{}` directly", path.display(), token));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Commands must use engine entry points:\n{}",
        violations.join("\n")
    );
}

// =============================================================================
// Rule Registration
// =============================================================================

/// Verify that every rule module is declared in `rules/mod.rs`.
#[test]
fn every_rule_module_is_declared() {
    let registry = read(Path::new("src/rules/mod.rs"));

    let missing: Vec<String> = rust_files("src/rules")
        .iter()
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .filter(|stem| stem != "mod")
        .filter(|stem| !registry.contains(&format!("mod {};", stem)))
        .collect();

    assert!(
        missing.is_empty(),
        "Rule modules not declared in src/rules/mod.rs: {:?}",
        missing
    );
}

/// Verify that the built-in registry holds one rule per module.
#[test]
fn builtin_registry_covers_every_rule_module() {
    let modules = rust_files("src/rules")
        .iter()
        .filter(|path| path.file_stem().map(|s| s != "mod").unwrap_or(false))
        .count();

    let registry = metadv::rules::RuleRegistry::builtin();
    assert_eq!(registry.len(), modules);

    let mut codes = registry.codes();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), modules, "rule codes must be unique");
}
