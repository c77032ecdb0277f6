mod commands;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "veil",
    version,
    about = "Hide another application's window from screen capture"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a window by title and exclude it from screen capture
    Apply(commands::apply::ApplyArgs),
    /// Show the current style, opacity, and cloak state of a window
    Inspect(commands::inspect::InspectArgs),
    /// List visible titled windows
    List,
    /// Create the default configuration file
    Init,
}

/// Maps a clap parse failure to veil's exit codes: help and version
/// requests exit 0, every usage error exits 1.
fn parse_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(e.kind()));
        }
    };

    match cli.command {
        Commands::Apply(args) => commands::apply::execute(&args),
        Commands::Inspect(args) => commands::inspect::execute(&args),
        Commands::List => commands::list::execute(),
        Commands::Init => commands::init::execute(),
    }
}
