// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for hub planning operations

use thiserror::Error;

use crate::domain::invariants::ValidationError;
use crate::planner::PlanningError;
use crate::topology::TopologyError;

/// Errors that can occur while planning against the hub
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Topology model failed to load or is inconsistent
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Request or hub state rejected by a planner
    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),

    /// A computed plan broke an invariant
    #[error("Plan validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for hub planning operations
pub type PlannerResult<T> = Result<T, PlannerError>;

