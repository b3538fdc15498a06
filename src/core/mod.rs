//! Custom-language overlay engine.
//!
//! ## Module Structure
//!
//! - `table`: Parsed key/value content of one translation file
//! - `parsers`: CSV and TSV table parsers
//! - `source_name`: `<locale>_<table>` file name resolution
//! - `locale`: Locale catalog and token resolution
//! - `loader`: Source discovery and concurrent reading
//! - `host`: Host localization framework boundary
//! - `registry`: Loaded languages and the table provider
//! - `overlay`: Settings and the load lifecycle tying it all together
//! - `analysis`: Key coverage checks against host metadata
//!
//! ## Load Pipeline
//!
//! 1. **Discovery and reading** (`loader`)
//!    - Walk the load directory, keep files matching the pattern
//!    - Read them through a `ReadExecutor` (sequential, rayon, or tokio)
//!
//! 2. **Registration** (`registry::build_language`)
//!    - Resolve each name, parse its content, resolve its locale
//!    - Register in discovery order; bad files are skipped and reported
//!
//! 3. **Host snapshot** (`overlay`)
//!    - Cache shared metadata for every default-locale host table
//!    - Attach the provider so lookups are served from the registry

pub mod analysis;
pub mod error;
pub mod host;
pub mod loader;
pub mod locale;
pub mod overlay;
pub mod parsers;
pub mod registry;
pub mod source_name;
pub mod table;

pub use error::{LoadError, OverlayError};
pub use host::{HostError, LocalizationHost, MemoryHost, SharedTableData};
pub use overlay::{LoadReport, Overlay, Settings};
pub use registry::{Registry, RegistryState, ResolvedTable, TableKind};
pub use table::TableEntry;
