// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Plan Invariants
//!
//! Business rules every plan must satisfy before it is handed to the
//! emitter. All functions are pure (no side effects) and return detailed
//! validation results.
//!
//! # Invariant Categories
//!
//! 1. **Idempotency**: resource keys are unique within a plan
//! 2. **Egress**: the number of default routes follows the decision table
//! 3. **Reachability**: exactly one forward route per foreign region
//! 4. **Ordering**: zone authorization precedes association

use std::collections::HashSet;

use crate::domain::{AccountRole, NetworkTier, Region, ResourceKey};
use crate::plan::{AttachmentPlan, RoutePurpose, ZoneAttachmentPlan, ZoneOperation};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Two operations share a resource key
    #[error("Duplicate resource key: {0}")]
    DuplicateResourceKey(String),

    /// Wrong number of `0.0.0.0/0` routes
    #[error("{role} spoke on {tier} must have {expected} default route(s), found {actual}")]
    DefaultRouteCount {
        role: AccountRole,
        tier: NetworkTier,
        expected: usize,
        actual: usize,
    },

    /// Cross-region routes do not cover exactly the foreign regions
    #[error("Cross-region routes for a {local} spoke must target {expected:?}, found {actual:?}")]
    CrossRegionCoverage {
        local: Region,
        expected: Vec<Region>,
        actual: Vec<Region>,
    },

    /// A route is filed under the wrong list
    #[error("Route {key} has purpose {purpose:?} but is listed with {listed_as}")]
    MisfiledRoute {
        key: String,
        purpose: RoutePurpose,
        listed_as: &'static str,
    },

    /// Zone association does not depend on its authorization
    #[error("Zone association {association} must depend on authorization {authorization}")]
    ZoneOrdering {
        association: String,
        authorization: String,
    },
}

/// Number of default routes the decision table yields
///
/// # Rules
/// - Tools spoke on prod: tools transit table plus private table (2)
/// - Everything else: exactly one
pub fn expected_default_routes(role: AccountRole, tier: NetworkTier) -> usize {
    match (role, tier) {
        (AccountRole::ToolsSpoke, NetworkTier::Prod) => 2,
        _ => 1,
    }
}

/// Validate that no key appears twice
pub fn validate_unique_keys<'a>(keys: impl IntoIterator<Item = &'a ResourceKey>) -> ValidationResult {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ValidationError::DuplicateResourceKey(key.to_string()));
        }
    }
    Ok(())
}

/// Validate the default-route count of a plan
pub fn validate_default_routes(plan: &AttachmentPlan) -> ValidationResult {
    let expected = expected_default_routes(plan.account_role, plan.spoke.tier);
    let actual = plan.default_routes().count();

    if actual != expected {
        return Err(ValidationError::DefaultRouteCount {
            role: plan.account_role,
            tier: plan.spoke.tier,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate cross-region completeness
///
/// # Rules
/// - Exactly one route per foreign region
/// - Never a route in the local region
/// - Only cross-region routes in the cross-region list, and vice versa
pub fn validate_cross_region_routes(plan: &AttachmentPlan) -> ValidationResult {
    let local = plan.spoke.region;

    for route in &plan.cross_region_route_ops {
        if route.purpose != RoutePurpose::CrossRegion {
            return Err(ValidationError::MisfiledRoute {
                key: route.resource_key.to_string(),
                purpose: route.purpose,
                listed_as: "cross-region routes",
            });
        }
    }
    for route in &plan.route_ops {
        if route.purpose == RoutePurpose::CrossRegion {
            return Err(ValidationError::MisfiledRoute {
                key: route.resource_key.to_string(),
                purpose: route.purpose,
                listed_as: "local routes",
            });
        }
    }

    let mut actual: Vec<Region> = plan
        .cross_region_route_ops
        .iter()
        .map(|route| route.region)
        .collect();
    actual.sort();

    let expected = local.others().to_vec();
    if actual != expected {
        return Err(ValidationError::CrossRegionCoverage {
            local,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Composite validation for an attachment plan
pub fn validate_attachment_plan(plan: &AttachmentPlan) -> ValidationResult {
    validate_unique_keys(plan.resource_keys())?;
    validate_default_routes(plan)?;
    validate_cross_region_routes(plan)?;
    Ok(())
}

/// Validate zone attachment ordering
///
/// # Rules
/// - Authorization is the first operation
/// - Association depends on the authorization's key
pub fn validate_zone_plan(plan: &ZoneAttachmentPlan) -> ValidationResult {
    let ordering_error = || ValidationError::ZoneOrdering {
        association: plan.association.resource_key.to_string(),
        authorization: plan.authorization.resource_key.to_string(),
    };

    match plan.operations() {
        [ZoneOperation::Authorize(authorization), ZoneOperation::Associate(association)] => {
            if association.depends_on != authorization.resource_key {
                return Err(ordering_error());
            }
        }
        _ => return Err(ordering_error()),
    }

    validate_unique_keys(plan.operations().iter().map(|op| op.resource_key()))
}
