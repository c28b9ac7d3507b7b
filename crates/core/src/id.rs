// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic entity id generation.
//!
//! Ids are built on the client so records created offline can be referenced
//! (and deduplicated in the queue) before the remote ever sees them.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Longest sanitized name kept in an id.
const MAX_NAME_LEN: usize = 20;

/// Reduce a display name to an id-safe slug.
///
/// Keeps ASCII alphanumerics and hyphens, turns whitespace runs into single
/// hyphens, caps the length and trims stray hyphens. Falls back to
/// `fallback` when nothing survives.
pub fn sanitize_name(name: &str, fallback: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_whitespace() {
            pending_hyphen = !slug.is_empty();
        } else if c.is_ascii_alphanumeric() || c == '-' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    let slug: String = slug.trim_matches('-').chars().take(MAX_NAME_LEN).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug.to_string()
    }
}

/// Generate a player or team ID from name and creation timestamp.
/// Format: {sanitized-name}-{hash} where hash is first 8 hex chars of SHA256(name + timestamp)
pub fn generate_id(name: &str, fallback: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", name, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", sanitize_name(name, fallback), short_hash)
}

/// Generate a game ID from its date, the two sides, and the wall-clock time.
/// Format: {YYYY-MM-DD}-{team}-vs-{opponent}-{HHMMSS}
pub fn generate_game_id(team: &str, opponent: &str, at: &DateTime<Utc>) -> String {
    format!(
        "{}-{}-vs-{}-{}",
        at.format("%Y-%m-%d"),
        sanitize_name(team, "team"),
        sanitize_name(opponent, "opponent"),
        at.format("%H%M%S")
    )
}

/// Make an ID unique, handling collisions by appending incrementing suffix.
pub fn make_unique<F>(base_id: String, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
