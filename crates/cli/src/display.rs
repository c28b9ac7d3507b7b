// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for command output.

use serde_json::Value;
use us_core::{Entity, EntityKind, Game, Player, QueueEntry, Team};

use crate::error::Result;
use crate::sync::{DrainOutcome, DrainReport, SkipReason, SyncSummary, Tracked};

const UNCONFIRMED_TAG: &str = "  [unsynced]";

fn tag(unconfirmed: bool) -> &'static str {
    if unconfirmed {
        UNCONFIRMED_TAG
    } else {
        ""
    }
}

/// Format a player as a single line: `Alex-1a2b  Alex #7 "Lefty"`.
pub fn format_player_line(player: &Tracked<Player>) -> String {
    let p = &player.entity;
    let mut line = format!("{}  {}", p.id().unwrap_or("-"), p.name);
    if let Some(number) = &p.number {
        line.push_str(&format!(" #{}", number));
    }
    if let Some(nickname) = &p.nickname {
        line.push_str(&format!(" \"{}\"", nickname));
    }
    line.push_str(tag(player.unconfirmed));
    line
}

pub fn format_team_line(team: &Tracked<Team>) -> String {
    let t = &team.entity;
    format!(
        "{}  {} ({} players){}",
        t.id().unwrap_or("-"),
        t.name,
        t.player_ids.len(),
        tag(team.unconfirmed)
    )
}

/// Format a game as a single line, with the score when the record has one.
pub fn format_game_line(game: &Tracked<Game>) -> String {
    let g = &game.entity;
    let mut line = format!("{}  {} vs {}", g.id().unwrap_or("-"), g.team, g.opponent);
    if let Some((ours, theirs)) = score(g) {
        line.push_str(&format!("  {}-{}", ours, theirs));
    }
    line.push_str(tag(game.unconfirmed));
    line
}

fn score(game: &Game) -> Option<(i64, i64)> {
    let scores = game.extra.get("scores")?;
    Some((scores.get("team")?.as_i64()?, scores.get("opponent")?.as_i64()?))
}

pub fn format_player_detail(player: &Tracked<Player>) -> String {
    let p = &player.entity;
    let mut out = format_player_line(player);
    for (label, value) in [
        ("Nickname", &p.nickname),
        ("Number", &p.number),
        ("Gender", &p.gender),
        ("Created", &p.created_at),
        ("Updated", &p.updated_at),
    ] {
        if let Some(value) = value {
            out.push_str(&format!("\n  {}: {}", label, value));
        }
    }
    out
}

pub fn format_team_detail(team: &Tracked<Team>) -> String {
    let t = &team.entity;
    let mut out = format_team_line(team);
    if !t.player_ids.is_empty() {
        out.push_str("\n\nRoster:");
        for id in &t.player_ids {
            out.push_str(&format!("\n  {}", id));
        }
    }
    out
}

pub fn format_game_detail(game: &Tracked<Game>) -> String {
    let g = &game.entity;
    let mut out = format_game_line(game);
    if let Some(team_id) = &g.team_id {
        out.push_str(&format!("\n  Team: {}", team_id));
    }
    if let Some(start) = &g.game_start_timestamp {
        out.push_str(&format!("\n  Started: {}", start));
    }
    let possessions: usize = g.points.iter().map(|p| p.possessions.len()).sum();
    out.push_str(&format!(
        "\n  Points: {} ({} possessions)",
        g.points.len(),
        possessions
    ));
    out
}

/// Renders a tracked entity as its record plus an `unconfirmed` flag.
pub fn tracked_json<E: Entity>(tracked: &Tracked<E>) -> Result<Value> {
    let mut record = tracked.entity.to_record()?;
    record.insert("unconfirmed".to_string(), Value::Bool(tracked.unconfirmed));
    Ok(Value::Object(record))
}

pub fn tracked_json_list<E: Entity>(items: &[Tracked<E>]) -> Result<Value> {
    let values = items.iter().map(tracked_json).collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(values))
}

fn format_failing_entry(entry: &QueueEntry) -> String {
    format!(
        "  {} {} {} (retries: {}): {}",
        entry.kind,
        entry.action,
        entry.entity_id,
        entry.retry_count,
        entry.last_error.as_deref().unwrap_or("unknown error")
    )
}

/// Format the sync status block.
///
/// ```text
/// offline
/// pending: 3 (player 1, team 1, game 1)
/// failing:
///   player update Alex-1a2b (retries: 2): name is required
/// ```
pub fn format_summary(summary: &SyncSummary) -> String {
    let mut out = String::from(if summary.online { "online" } else { "offline" });
    if summary.syncing {
        out.push_str(" (syncing)");
    }

    if summary.is_synced() {
        out.push_str("\nall changes synced");
        return out;
    }

    let mut kinds: Vec<String> = EntityKind::KNOWN
        .iter()
        .filter(|kind| summary.pending.get(**kind) > 0)
        .map(|kind| format!("{} {}", kind, summary.pending.get(*kind)))
        .collect();
    if summary.pending.unknown > 0 {
        kinds.push(format!("unknown {}", summary.pending.unknown));
    }
    out.push_str(&format!(
        "\npending: {} ({})",
        summary.pending.total(),
        kinds.join(", ")
    ));

    if !summary.failing.is_empty() {
        out.push_str("\nfailing:");
        for entry in &summary.failing {
            out.push('\n');
            out.push_str(&format_failing_entry(entry));
        }
    }
    out
}

pub fn format_drain_report(report: &DrainReport) -> String {
    let headline = match report.outcome {
        DrainOutcome::Skipped(SkipReason::Empty) => return "nothing to sync".to_string(),
        DrainOutcome::Skipped(SkipReason::Offline) => "offline, nothing sent",
        DrainOutcome::Skipped(SkipReason::InFlight) => "a sync is already running",
        DrainOutcome::Completed => "synced",
        DrainOutcome::Aborted => "connection lost",
    };
    let mut out = format!(
        "{}: {} confirmed, {} rejected, {} remaining",
        headline, report.confirmed, report.rejected, report.remaining
    );
    if report.superseded > 0 {
        out.push_str(&format!(", {} superseded", report.superseded));
    }
    out
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
