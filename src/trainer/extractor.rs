// ABOUTME: Parameter extraction from free-text workout requests
// ABOUTME: Pulls duration, difficulty, and style preferences with fixed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Parameter Extractor
//!
//! Pulls numeric and categorical hints out of raw user text:
//!
//! - Duration: first integer attached to a "minute"/"min" token, with or
//!   without a hyphen, default 30
//! - Difficulty: keyword families, default intermediate
//! - Preferences: independent keyword checks concatenated in a fixed
//!   priority order, default "general fitness"
//!
//! Extraction is total; any unparseable input falls back to defaults.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Difficulty;

/// Default workout length when the message names none
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Default preference string when no style keyword matches
pub const DEFAULT_PREFERENCES: &str = "general fitness";

/// Difficulty keyword families, checked in order; first match wins
const DIFFICULTY_RULES: &[(&str, Difficulty)] = &[
    (r"(?i)\b(?:beginner|easy|simple)\b", Difficulty::Beginner),
    (r"(?i)\b(?:advanced|hard|challenging)\b", Difficulty::Advanced),
];

/// Preference keyword rules in fixed priority order; matches concatenate
const PREFERENCE_RULES: &[(&str, &str)] = &[
    (r"(?i)\bcardio\b", "cardio"),
    (r"(?i)\bstrength\b", "strength"),
    (r"(?i)\bhiit\b", "hiit"),
    (r"(?i)\b(?:yoga|flexibility)\b", "flexibility"),
];

/// Parameters extracted from one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedParameters {
    /// Requested duration in minutes
    pub duration_minutes: u32,
    /// Requested difficulty
    pub difficulty: Difficulty,
    /// Comma-separated preference tokens
    pub preferences: String,
}

fn duration_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(\d+)[\s-]*(?:minute|min)").ok())
        .as_ref()
}

fn compiled_rules<T: Copy>(
    cell: &'static OnceLock<Vec<(Regex, T)>>,
    rules: &[(&str, T)],
) -> &'static [(Regex, T)] {
    cell.get_or_init(|| {
        rules
            .iter()
            .filter_map(|(pattern, effect)| Regex::new(pattern).ok().map(|re| (re, *effect)))
            .collect()
    })
}

/// Extract the requested duration in minutes
///
/// Returns the first integer attached to a "minute"/"min" token, allowing
/// "20-minute" as well as "20 minutes", or the default. Integers too large
/// for `u32` also fall back to the default.
#[must_use]
pub fn extract_duration(message: &str) -> u32 {
    duration_pattern()
        .and_then(|re| re.captures(message))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(DEFAULT_DURATION_MINUTES)
}

/// Extract the requested difficulty
///
/// Total: returns exactly one of the three levels, with intermediate
/// winning ties and unmatched text.
#[must_use]
pub fn extract_difficulty(message: &str) -> Difficulty {
    static RULES: OnceLock<Vec<(Regex, Difficulty)>> = OnceLock::new();
    for (pattern, difficulty) in compiled_rules(&RULES, DIFFICULTY_RULES) {
        if pattern.is_match(message) {
            return *difficulty;
        }
    }
    Difficulty::Intermediate
}

/// Extract style preferences
///
/// Non-exclusive: every matching keyword family contributes its token, in
/// rule-table order, joined with ", ". An empty match set yields the
/// default string.
#[must_use]
pub fn extract_preferences(message: &str) -> String {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    let matched: Vec<&str> = compiled_rules(&RULES, PREFERENCE_RULES)
        .iter()
        .filter(|(pattern, _)| pattern.is_match(message))
        .map(|(_, token)| *token)
        .collect();

    if matched.is_empty() {
        DEFAULT_PREFERENCES.to_owned()
    } else {
        matched.join(", ")
    }
}

/// Extract all generation parameters from one message
#[must_use]
pub fn extract_parameters(message: &str) -> ExtractedParameters {
    ExtractedParameters {
        duration_minutes: extract_duration(message),
        difficulty: extract_difficulty(message),
        preferences: extract_preferences(message),
    }
}
