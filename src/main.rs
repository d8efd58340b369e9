use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::process;
use trackd::models::RecordKind;
use trackd::Result;

#[derive(Parser)]
#[command(name = "trackd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Work-tracking record validator and extractor", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a record against its kind's schema
    #[command(subcommand)]
    Validate(ValidateCommands),

    /// Extract decisions from a session and render its decision log
    Decisions {
        /// Session record file
        file: PathBuf,
    },

    /// Check text for tracker-export compatibility
    Compat {
        /// File to check, or '-' to read stdin
        target: String,
    },

    /// Tracker configuration operations
    #[command(subcommand)]
    Config(trackd::cli::config::ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ValidateCommands {
    /// Validate a session record
    Session { file: PathBuf },

    /// Validate a council record
    Council { file: PathBuf },

    /// Validate an architecture decision record
    Adr { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Validate(cmd) => {
            let (kind, file) = match cmd {
                ValidateCommands::Session { file } => (RecordKind::Session, file),
                ValidateCommands::Council { file } => (RecordKind::Council, file),
                ValidateCommands::Adr { file } => (RecordKind::Adr, file),
            };
            trackd::cli::validate::run(kind, &file)
        }

        Commands::Decisions { file } => trackd::cli::decisions::run(&file),

        Commands::Compat { target } => trackd::cli::compat::run(&target),

        Commands::Config(cmd) => trackd::cli::config::run(cmd),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "trackd", &mut io::stdout());
            Ok(0)
        }
    }
}
