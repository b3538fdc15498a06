//! langpatch - custom translation tables layered over a host localization system
//!
//! langpatch loads CSV/TSV translation files named `<locale>_<table>` from a
//! directory and serves them as overrides for the host's string tables.
//! Missing tables, unknown locales, and unreadable files fall back to the
//! host's own data instead of failing.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`check`, `show`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Overlay engine (parsing, loading, registry, host boundary)
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
