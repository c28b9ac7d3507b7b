// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `ULTISTATS_API_URL` if set and non-empty.
pub fn api_url() -> Option<String> {
    non_empty(vars::ULTISTATS_API_URL)
}

/// Returns the value of `ULTISTATS_HOST` if set and non-empty.
pub fn api_host() -> Option<String> {
    non_empty(vars::ULTISTATS_HOST)
}

/// Returns the value of `ULTISTATS_PORT` if set and non-empty.
pub fn api_port() -> Option<String> {
    non_empty(vars::ULTISTATS_PORT)
}

/// Returns the value of `ULTISYNC_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var(vars::ULTISYNC_STATE_DIR)
        .ok()
        .map(PathBuf::from)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    std::env::var(vars::XDG_STATE_HOME).ok().map(PathBuf::from)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
