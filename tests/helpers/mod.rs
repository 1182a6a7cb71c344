// ABOUTME: Test helper modules shared across integration tests
// ABOUTME: Re-exports the axum request builder

pub mod axum_test;
