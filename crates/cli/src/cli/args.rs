// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! Used with `#[command(flatten)]` where `add` and `edit` take the same
//! optional attributes.

use clap::Args;

use super::non_empty_string;

/// Optional player attributes.
#[derive(Args, Clone, Debug, Default)]
pub struct PlayerFields {
    /// Nickname shown on the roster
    #[arg(long)]
    pub nickname: Option<String>,

    /// Jersey number
    #[arg(long)]
    pub number: Option<String>,

    /// Gender matching (as recorded by the stats service)
    #[arg(long)]
    pub gender: Option<String>,
}

impl PlayerFields {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.number.is_none() && self.gender.is_none()
    }
}

/// Roster arguments for teams.
#[derive(Args, Clone, Debug, Default)]
pub struct RosterArgs {
    /// Player id on the roster (repeat for several)
    #[arg(long = "player", short = 'p', value_parser = non_empty_string)]
    pub players: Vec<String>,
}
