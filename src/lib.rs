//! dex-subset: copy a curated subset of a Pokédex into a regional dex
//!
//! Maintainers list the Pokémon they want in a text file; dex-subset pulls
//! the matching entries out of the complete dex (`all.json`), asks which
//! alternate forms to keep, and writes the result as `<region>.json`.
//!
//! # Architecture
//!
//! - **Loader** ([`dex`]): reads the names list and indexes the source dex by name
//! - **Copier** ([`copier`]): filters each entry's forms through a [`Prompter`]
//! - **Writer** ([`writer`]): guards the destination and writes it atomically
//!
//! # Example Usage
//!
//! ```no_run
//! use dex_subset::{DexConfig, ScriptedPrompter, cli::handle_copy};
//! use std::path::Path;
//!
//! let config = DexConfig::default();
//! let mut prompter = ScriptedPrompter::new(["y", "n"]);
//! let written = handle_copy(&config, Path::new("kanto.txt"), "kanto", false, &mut prompter).unwrap();
//!
//! println!("Wrote {}", written.display());
//! ```

pub mod cli;
pub mod config;
pub mod copier;
pub mod dex;
pub mod error;
pub mod models;
pub mod output;
pub mod prompt;
pub mod writer;

// Re-export commonly used types
pub use config::DexConfig;
pub use copier::FormFilter;
pub use dex::SourceDex;
pub use error::DexError;
pub use models::{Form, Record};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};
