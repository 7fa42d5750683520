// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Hub Planning
//!
//! Orchestrates the pure planners against a topology model and a hub
//! resolver. The planners never look anything up themselves; the service
//! resolves, plans and validates.
//!
//! # Architecture
//!
//! ```text
//! SpokeAttachmentRequest
//!     ↓
//! Service Layer (this module)
//!     ↓
//! NetworkInstanceResolver → HubSet → ConnectorTable
//!     ↓
//! AttachmentPlanner (pure)
//!     ↓
//! Plan invariants (pure)
//!     ↓
//! AttachmentPlan → external emitter
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use transit_hub_planner::service::{HubPlanningService, SpokePlanningService};
//!
//! let service = HubPlanningService::new(topology, resolver);
//! let plan = service.plan_attachment(&request)?;
//! println!("{}", plan.summary());
//! ```

pub mod hub_planning;

pub use hub_planning::{HubPlanningService, SpokePlanningService};
