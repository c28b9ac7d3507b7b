// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::{PlayerFields, RosterArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "ultisync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first sync for ultimate frisbee players, teams and games")]
#[command(
    long_about = "Offline-first sync for ultimate frisbee players, teams and games.\n\n\
    Every change is stored locally first and pushed to the stats service when it is reachable."
)]
pub struct Cli {
    /// State directory (default: $XDG_STATE_HOME/ultisync)
    #[arg(long = "state-dir", global = true, value_name = "dir")]
    pub state_dir: Option<PathBuf>,

    /// Log engine activity to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage players
    #[command(subcommand)]
    Player(PlayerCommand),

    /// Manage teams
    #[command(subcommand)]
    Team(TeamCommand),

    /// Manage games
    #[command(subcommand)]
    Game(GameCommand),

    /// Show connectivity and pending changes
    Status {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Push pending changes now
    #[command(after_help = "\
Examples:
  ultisync sync              Probe the service, then push everything queued
  ultisync sync -o json      Print the drain report as JSON")]
    Sync {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Keep syncing in the foreground until interrupted
    Watch,
}

#[derive(Subcommand)]
pub enum PlayerCommand {
    /// Create a player
    #[command(after_help = "\
Examples:
  ultisync player add Alex                  Id derived from the name
  ultisync player add Alex --number 7       With a jersey number
  ultisync player add Sam --id sam-1        With an explicit id")]
    Add {
        /// Player name
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Use this id instead of deriving one
        #[arg(long, value_parser = non_empty_string)]
        id: Option<String>,

        #[command(flatten)]
        fields: PlayerFields,
    },

    /// Change a player's attributes
    #[command(arg_required_else_help = true)]
    Edit {
        /// Player id
        id: String,

        /// New name
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        #[command(flatten)]
        fields: PlayerFields,
    },

    /// Show a player
    Show {
        /// Player id
        id: String,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List players
    List {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Delete a player
    Rm {
        /// Player id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TeamCommand {
    /// Create a team
    #[command(after_help = "\
Examples:
  ultisync team add Thunder                         Empty roster
  ultisync team add Thunder -p Alex-1a2b -p sam-1   With two players")]
    Add {
        /// Team name
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Use this id instead of deriving one
        #[arg(long, value_parser = non_empty_string)]
        id: Option<String>,

        #[command(flatten)]
        roster: RosterArgs,
    },

    /// Rename a team or replace its roster
    #[command(arg_required_else_help = true)]
    Edit {
        /// Team id
        id: String,

        /// New name
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,

        #[command(flatten)]
        roster: RosterArgs,
    },

    /// Show a team
    Show {
        /// Team id
        id: String,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List teams
    List {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Delete a team
    Rm {
        /// Team id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum GameCommand {
    /// Start a game record
    #[command(after_help = "\
Examples:
  ultisync game add --team Thunder --opponent Lightning")]
    Add {
        /// Our team's name
        #[arg(long, value_parser = non_empty_string)]
        team: String,

        /// Opponent's name
        #[arg(long, value_parser = non_empty_string)]
        opponent: String,

        /// Id of the team record this game belongs to
        #[arg(long = "team-id", value_parser = non_empty_string)]
        team_id: Option<String>,

        /// Use this id instead of deriving one
        #[arg(long, value_parser = non_empty_string)]
        id: Option<String>,
    },

    /// Push a full game (points, possessions, events) from a JSON file
    #[command(after_help = "\
Examples:
  ultisync game push game.json     Read the game from a file
  ultisync game push -             Read the game from stdin")]
    Push {
        /// JSON file holding the game, or - for stdin
        file: PathBuf,
    },

    /// Show a game
    Show {
        /// Game id
        id: String,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List games
    List {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Delete a game
    Rm {
        /// Game id
        id: String,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
