// Copyright (c) 2025 - Cowboy AI, Inc.
//! Private hosted zone sharing

mod fixtures;

use fixtures::*;
use pretty_assertions::assert_eq;
use transit_hub_planner::domain::invariants::validate_zone_plan;
use transit_hub_planner::domain::{HostedZoneId, Region};
use transit_hub_planner::plan::ZoneOperation;
use transit_hub_planner::{plan_zone_attachment, SpokePlanningService};

#[test]
fn test_zone_shared_by_hub_account() -> anyhow::Result<()> {
    let zone_id = HostedZoneId::new("Z04SHAREDSERVICES")?;
    let vpc_id = vpc_id("payments", Region::Recovery);

    let plan = service().plan_zone_attachment(&vpc_id, &zone_id)?;

    assert_eq!(plan.authorization.owner.name, "network-hub");
    assert_eq!(plan.authorization.owner.account_id.as_str(), "111111111111");
    assert_eq!(plan.association.vpc_id, vpc_id);
    assert_eq!(plan.association.depends_on, plan.authorization.resource_key);
    Ok(())
}

#[test]
fn test_every_spoke_vpc_gets_ordered_operations() -> anyhow::Result<()> {
    let topology = topology();
    let owner = topology.hub_account()?.as_account_ref();
    let zone_id = HostedZoneId::new("Z04SHAREDSERVICES")?;

    for account in topology.accounts().filter(|account| account.role.is_spoke()) {
        for region in account.cidrs.keys() {
            let plan = plan_zone_attachment(&vpc_id(account.name.as_str(), *region), &zone_id, &owner);

            let order: Vec<&str> = plan
                .operations()
                .iter()
                .map(|op| match op {
                    ZoneOperation::Authorize(_) => "authorize",
                    ZoneOperation::Associate(_) => "associate",
                })
                .collect();
            assert_eq!(order, vec!["authorize", "associate"]);
            assert!(validate_zone_plan(&plan).is_ok());
        }
    }
    Ok(())
}

#[test]
fn test_zone_plan_json_shape() -> anyhow::Result<()> {
    let plan = service().plan_zone_attachment(
        &vpc_id("tools", Region::Primary),
        &HostedZoneId::new("Z04SHAREDSERVICES")?,
    )?;
    let json = serde_json::to_value(&plan)?;

    assert_eq!(
        json["association"]["depends_on"],
        "phz/Z04SHAREDSERVICES/vpc-tools-primary/authorization"
    );
    assert_eq!(json["authorization"]["owner"]["account_id"], "111111111111");
    Ok(())
}
