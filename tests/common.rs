// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides the scripted model provider and server resource helpers
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `wot_trainer`
//!
//! Integration tests run the real router and database against a scripted
//! model provider, so every pipeline outcome can be produced on demand.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use wot_trainer::config::ServerConfig;
use wot_trainer::database::Database;
use wot_trainer::errors::{AppError, AppResult};
use wot_trainer::llm::{ChatRequest, ChatResponse, LlmProvider};
use wot_trainer::resources::ServerResources;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Model timeout used by test resources, kept short so timeout tests run fast
pub const TEST_MODEL_TIMEOUT: Duration = Duration::from_millis(250);

/// A model reply as valid plan JSON wrapped in prose, the common case
pub const PLAN_REPLY: &str = r#"Here's your workout!

{
    "name": "Quick HIIT Blast",
    "description": "Short, sharp intervals",
    "warmup": [
        {"name": "Jumping jacks", "durationSeconds": 60, "instructions": "Steady pace"}
    ],
    "main": [
        {"name": "Squat jumps", "sets": 3, "reps": "10-12", "restSeconds": 45, "instructions": "Land softly"},
        {"name": "Push-ups", "sets": 3, "reps": 10, "restSeconds": 60, "instructions": "Core tight"},
        {"name": "Plank", "durationSeconds": 45, "instructions": "Neutral spine"}
    ],
    "cooldown": [
        {"name": "Hamstring stretch", "durationSeconds": 30, "instructions": "Gentle hold"}
    ]
}

Enjoy your session!"#;

/// One scripted outcome for the mock provider
pub enum MockReply {
    /// Return this text
    Text(&'static str),
    /// Return this text after sleeping, for timeout tests
    Delayed(&'static str, Duration),
    /// Fail as if the model were down
    Unavailable,
}

/// Scripted model provider
///
/// Pops one reply per call; an exhausted script fails as unavailable so a
/// test that makes more calls than it scripted fails loudly.
pub struct MockLlm {
    script: Mutex<VecDeque<MockReply>>,
}

impl MockLlm {
    pub fn new(script: Vec<MockReply>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Provider that always answers with the same text
    pub fn always(text: &'static str, calls: usize) -> Self {
        Self::new((0..calls).map(|_| MockReply::Text(text)).collect())
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn display_name(&self) -> &'static str {
        "Mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> AppResult<ChatResponse> {
        let reply = self
            .script
            .lock()
            .map_err(|_| AppError::internal("mock script lock poisoned"))?
            .pop_front();

        let text = match reply {
            Some(MockReply::Text(text)) => text,
            Some(MockReply::Delayed(text, delay)) => {
                tokio::time::sleep(delay).await;
                text
            }
            Some(MockReply::Unavailable) => {
                return Err(AppError::model_unavailable("scripted outage"))
            }
            None => return Err(AppError::model_unavailable("mock script exhausted")),
        };

        Ok(ChatResponse {
            content: text.to_owned(),
            model: "mock-model".to_owned(),
        })
    }
}

/// Build server resources over an in-memory database and a scripted model
pub async fn create_test_resources(script: Vec<MockReply>) -> Arc<ServerResources> {
    init_test_logging();

    let database = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory database setup failed");

    let config = ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        model_timeout: TEST_MODEL_TIMEOUT,
        ..ServerConfig::default()
    };

    Arc::new(ServerResources::new(
        database,
        Arc::new(MockLlm::new(script)),
        config,
    ))
}
