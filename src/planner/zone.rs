// Copyright (c) 2025 - Cowboy AI, Inc.
//! Private Hosted Zone Attachment
//!
//! Zones owned by the hub account are shared with spoke VPCs in two steps:
//! the owner authorizes the association, then the spoke associates. The
//! association must never be applied before its authorization.

use tracing::debug;

use crate::domain::{HostedZoneId, ResourceKey, VpcId};
use crate::plan::{AccountRef, ZoneAssociation, ZoneAttachmentPlan, ZoneAuthorization};

/// Plan the association of `spoke_vpc_id` with a hub-owned zone
///
/// Keys are derived from the zone and VPC alone, so re-planning the same
/// pair yields the same keys.
pub fn plan_zone_attachment(
    spoke_vpc_id: &VpcId,
    zone_id: &HostedZoneId,
    hub_account: &AccountRef,
) -> ZoneAttachmentPlan {
    let key = |step: &str| {
        ResourceKey::from_segments(["phz", zone_id.as_str(), spoke_vpc_id.as_str(), step])
    };

    let authorization = ZoneAuthorization {
        resource_key: key("authorization"),
        owner: hub_account.clone(),
        zone_id: zone_id.clone(),
        vpc_id: spoke_vpc_id.clone(),
    };

    let association = ZoneAssociation {
        resource_key: key("association"),
        zone_id: zone_id.clone(),
        vpc_id: spoke_vpc_id.clone(),
        depends_on: authorization.resource_key.clone(),
    };

    debug!(
        "Zone {} shared with {} by {}",
        zone_id, spoke_vpc_id, hub_account.name
    );

    ZoneAttachmentPlan {
        authorization,
        association,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invariants::validate_zone_plan;
    use crate::domain::AccountId;
    use crate::plan::ZoneOperation;

    fn hub_account() -> AccountRef {
        AccountRef::new("network-hub", AccountId::new("000000000001").unwrap())
    }

    fn plan() -> ZoneAttachmentPlan {
        plan_zone_attachment(
            &VpcId::new("vpc-payments-primary").unwrap(),
            &HostedZoneId::new("Z0123456789ABC").unwrap(),
            &hub_account(),
        )
    }

    #[test]
    fn test_authorization_precedes_association() {
        let plan = plan();

        match plan.operations() {
            [ZoneOperation::Authorize(authorization), ZoneOperation::Associate(association)] => {
                assert_eq!(association.depends_on, authorization.resource_key);
            }
            other => panic!("unexpected operation order: {other:?}"),
        }
        assert!(validate_zone_plan(&plan).is_ok());
    }

    #[test]
    fn test_authorization_created_by_hub_account() {
        let plan = plan();
        assert_eq!(plan.authorization.owner, hub_account());
        assert_eq!(plan.authorization.vpc_id, plan.association.vpc_id);
        assert_eq!(plan.authorization.zone_id, plan.association.zone_id);
    }

    #[test]
    fn test_keys_are_stable() {
        let plan = plan();
        assert_eq!(
            plan.authorization.resource_key.as_str(),
            "phz/Z0123456789ABC/vpc-payments-primary/authorization"
        );
        assert_eq!(
            plan.association.resource_key.as_str(),
            "phz/Z0123456789ABC/vpc-payments-primary/association"
        );
        assert_eq!(plan, self::plan());
    }
}
