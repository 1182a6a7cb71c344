// ABOUTME: Intent classification for inbound trainer messages
// ABOUTME: Rule-table keyword matching decides workout-request vs ordinary conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Intent Classifier
//!
//! Decides whether a message asks for workout generation or is ordinary
//! conversation. Classification is deliberately cheap and deterministic:
//! a message is a workout request when it contains both a request verb and
//! a workout-domain noun. No model call is made. False positives and
//! negatives are an accepted limitation of keyword matching.
//!
//! The vocabulary is kept as explicit rule tables so individual rules can
//! be unit-tested and extended without touching control flow.

use regex::Regex;
use std::sync::OnceLock;

/// One vocabulary rule: a name for test output and a regex fragment
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    /// Rule identifier
    pub name: &'static str,
    /// Regex fragment matched case-insensitively with word boundaries
    pub pattern: &'static str,
}

/// Request verbs that signal the user wants something produced
pub const REQUEST_VERBS: &[IntentRule] = &[
    IntentRule { name: "create", pattern: "create" },
    IntentRule { name: "generate", pattern: "generate" },
    IntentRule { name: "make", pattern: "make" },
    IntentRule { name: "design", pattern: "design" },
    IntentRule { name: "build", pattern: "build" },
    IntentRule { name: "suggest", pattern: "suggest" },
    IntentRule { name: "give-me", pattern: "give me" },
];

/// Workout-domain nouns
pub const WORKOUT_NOUNS: &[IntentRule] = &[
    IntentRule { name: "workout", pattern: "workout" },
    IntentRule { name: "routine", pattern: "routine" },
    IntentRule { name: "exercise", pattern: "exercise" },
    IntentRule { name: "training", pattern: "training" },
];

fn compile(rules: &[IntentRule]) -> Option<Regex> {
    let alternation = rules
        .iter()
        .map(|rule| rule.pattern)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})")).ok()
}

fn verb_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| compile(REQUEST_VERBS)).as_ref()
}

fn noun_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| compile(WORKOUT_NOUNS)).as_ref()
}

/// Classify a message as a workout-generation request
///
/// Total function: always returns a boolean, never fails. A message
/// qualifies when it matches at least one request verb and at least one
/// workout noun.
#[must_use]
pub fn is_workout_request(message: &str) -> bool {
    match (verb_pattern(), noun_pattern()) {
        (Some(verbs), Some(nouns)) => verbs.is_match(message) && nouns.is_match(message),
        // Pattern compilation failure would be a programming error in the
        // rule tables; classify conservatively as conversation.
        _ => false,
    }
}
