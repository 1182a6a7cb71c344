// ABOUTME: Client-side support for the trainer API
// ABOUTME: HTTP client plus the conversation view state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # Trainer Client
//!
//! Everything a frontend needs to talk to the backend: [`ApiClient`] wraps
//! the HTTP surface with a bounded request timeout, and the
//! [`conversation`] module models the chat screen as a pure state machine
//! driven by events, with [`ConversationController`] bridging the two.

pub mod api;
pub mod conversation;

pub use api::ApiClient;
pub use conversation::{
    ConversationController, ConversationEvent, ConversationState, ReplyPayload,
};
