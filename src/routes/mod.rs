// ABOUTME: HTTP route registration for the trainer backend
// ABOUTME: Assembles the trainer, workout, and health routers into one app
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WOT Fitness

//! # HTTP Routes
//!
//! Each module owns one resource family and exposes a `routes` constructor
//! taking the shared [`ServerResources`]. [`router`] merges them and adds
//! request tracing.

pub mod health;
pub mod trainer;
pub mod workouts;

pub use health::HealthRoutes;
pub use trainer::TrainerRoutes;
pub use workouts::WorkoutRoutes;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::resources::ServerResources;

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(TrainerRoutes::routes(resources.clone()))
        .merge(WorkoutRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}
