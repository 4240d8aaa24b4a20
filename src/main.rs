//! dex-subset CLI entrypoint

use clap::Parser;
use clap::error::ErrorKind;

use dex_subset::cli::Cli;
use dex_subset::output;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors go to stdout with status 1
            print!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.execute() {
        // Display error in red with clean formatting
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
