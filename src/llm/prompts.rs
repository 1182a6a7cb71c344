// ABOUTME: System prompts for the trainer's LLM interactions
// ABOUTME: Provides the coaching persona and the exercise-form guidance prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # System Prompts
//!
//! The conversational persona used for plain chat, and the prompt used for
//! exercise-form guidance. The workout generation prompt lives in
//! [`crate::trainer::prompt`] because its output-format contract is coupled
//! to the response parser.

/// Conversational persona for the AI trainer
pub const TRAINER_SYSTEM_PROMPT: &str = "\
You are WOT, a friendly and knowledgeable personal fitness trainer. \
You help users with workout advice, exercise technique, recovery, and \
motivation. Keep answers concise and practical. If a user asks you to \
create a workout, the app handles that separately; just answer fitness \
questions conversationally.";

/// Get the system prompt for plain trainer conversation
#[must_use]
pub const fn get_trainer_system_prompt() -> &'static str {
    TRAINER_SYSTEM_PROMPT
}

/// Build the prompt for text-only exercise form guidance
#[must_use]
pub fn form_guidance_prompt(exercise: &str) -> String {
    format!(
        "Explain the proper form for the exercise \"{exercise}\". \
         Cover setup, movement, breathing, and the most common mistakes. \
         Answer in plain text, no more than six short bullet points."
    )
}
