// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s.,;:!?()\-]").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip everything outside `[A-Za-z0-9 .,;:!?()-]`, collapse whitespace
/// runs to one space and trim.
///
/// Stripping happens first so a removed character between two spaces never
/// leaves a double space behind.
pub fn normalize(raw: &str) -> String {
    let stripped = DISALLOWED_CHARS.replace_all(raw, "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Dot-separated segments, trimmed, empties dropped.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split('.').map(str::trim).filter(|s| !s.is_empty())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
