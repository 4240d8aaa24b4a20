//! CLI argument parsing and the copy pipeline

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::{self, DexConfig};
use crate::copier::FormFilter;
use crate::dex::{self, SourceDex};
use crate::output;
use crate::prompt::{Prompter, TerminalPrompter};
use crate::writer::{self, JsonStyle};

/// Copy the Pokémon listed in a file into a new regional dex
#[derive(Parser, Debug)]
#[command(
    name = "dex-subset",
    version,
    about = "Copy the Pokémon listed in a file to a new Pokédex file",
    long_about = "Copies the Pokémon named in NAMES_FILE (one per line) from the complete dex \
                  into <dex dir>/REGION.json, asking which alternate forms to keep.\n\n\
                  Forms with a skipped sprite suffix (mega, gigantamax, alola, hisui, galar \
                  by default) are dropped without asking."
)]
pub struct Cli {
    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Folder holding all.json and the regional dexes (overrides config)
    #[arg(short, long, value_name = "DIR")]
    pub dex_dir: Option<PathBuf>,

    /// Config file (defaults to ./dex-subset.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing regional dex without asking
    #[arg(short, long)]
    pub force: bool,

    /// Text file with one Pokémon name per line
    #[arg(value_name = "NAMES_FILE")]
    pub names_file: PathBuf,

    /// Name of the regional dex to write (REGION.json)
    #[arg(value_name = "REGION")]
    pub region: String,
}

impl Cli {
    /// Execute the CLI command against the terminal
    pub fn execute(self) -> Result<()> {
        // Setup logging based on verbosity
        let log_level = match self.verbose {
            0 => "warn",   // Default: only warnings and errors
            1 => "info",   // -v: show info messages
            2 => "debug",  // -vv: show debug messages
            _ => "trace",  // -vvv: show trace messages
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        let mut config = config::load_config(self.config.as_deref())?;
        if let Some(dir) = self.dex_dir {
            config.dir = dir;
        }
        log::debug!("Using dex config: {:?}", config);

        let mut prompter = TerminalPrompter::stdio();
        let destination = handle_copy(&config, &self.names_file, &self.region, self.force, &mut prompter)?;

        output::info(&format!("Wrote {}", destination.display()));
        Ok(())
    }
}

/// Copy the entries named in `names_file` into the `region` dex.
///
/// Nothing is written unless every step succeeds. Returns the destination path.
pub fn handle_copy(
    config: &DexConfig,
    names_file: &Path,
    region: &str,
    force: bool,
    prompter: &mut dyn Prompter,
) -> Result<PathBuf> {
    let names = dex::read_names(names_file)
        .with_context(|| format!("Failed to read names from {}", names_file.display()))?;

    let destination = config.destination_path(region);
    writer::confirm_overwrite(&destination, force, prompter)?;

    let source_path = config.source_path();
    let source = SourceDex::load(&source_path)
        .with_context(|| format!("Failed to load source dex {}", source_path.display()))?;
    let selected = source.select(&names)?;

    let filter = FormFilter::from_config(config);
    let copied = filter.copy_all(selected, prompter)?;

    writer::write_dex(&destination, &copied, JsonStyle::from_config(config))
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    Ok(destination)
}
