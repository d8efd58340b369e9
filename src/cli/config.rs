use crate::config::ProjectConfig;
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use serde_json::Value;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the tracker configuration, or one value by dot path
    Get {
        /// Dot path under the tracker settings (e.g. "project.id")
        key: Option<String>,
    },

    /// Record a team name in tracker.known_teams
    AddTeam {
        /// Team name as the tracker shows it
        name: String,
    },
}

pub fn run(cmd: ConfigCommands) -> Result<i32> {
    let cwd = std::env::current_dir()?;

    match cmd {
        ConfigCommands::Get { key } => {
            let config = ProjectConfig::load(&cwd)?;
            match key {
                None => println!("{}", serde_json::to_string_pretty(&config.tracker())?),
                Some(key) => match config.get(&key) {
                    None => {
                        eprintln!("Key not found: {}", key);
                        return Ok(1);
                    }
                    Some(Value::String(s)) => println!("{}", s),
                    Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                },
            }
            Ok(0)
        }

        ConfigCommands::AddTeam { name } => {
            let mut config = ProjectConfig::load(&cwd)?;
            if config.add_known_team(&name)? {
                println!("{}", format!("✓ Added team: {}", name).green());
            } else {
                println!("{}", format!("Team already known: {}", name).yellow());
            }
            Ok(0)
        }
    }
}
