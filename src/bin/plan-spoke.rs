// Copyright (c) 2025 - Cowboy AI, Inc.
//! Spoke Attachment Planner CLI
//!
//! Reads a topology snapshot, resolved hub handles and a spoke attachment
//! request, then prints the plan as JSON on stdout for the emitter.
//!
//! Run with: cargo run --bin plan-spoke
//!
//! Environment:
//! 1. HUB_PLANNER_TOPOLOGY - topology snapshot (JSON)
//! 2. HUB_PLANNER_HUBS - array of resolved hub handles (JSON)
//! 3. HUB_PLANNER_REQUEST - spoke attachment request (JSON)
//! 4. HUB_PLANNER_ZONE_ID - optional hub-owned private hosted zone to share
//! 5. HUB_PLANNER_DUAL_TIER - plan a tools spoke against both tiers

use anyhow::{Context, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;
use transit_hub_planner::{
    domain::HostedZoneId, HubPlanningService, SpokeAttachmentRequest, SpokePlanningService,
    StaticNetworkInstanceResolver, TopologyModel,
};

/// Configuration for a planning run
#[derive(Debug, Clone)]
struct PlanSpokeConfig {
    /// Topology snapshot path
    topology_path: PathBuf,
    /// Hub handle snapshot path
    hubs_path: PathBuf,
    /// Request path
    request_path: PathBuf,
    /// Zone to share with the spoke VPC, if any
    zone_id: Option<String>,
    dual_tier: bool,
}

impl PlanSpokeConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let path = |name: &str| -> Result<PathBuf> {
            std::env::var(name)
                .map(PathBuf::from)
                .with_context(|| format!("{name} not set"))
        };

        let dual_tier = std::env::var("HUB_PLANNER_DUAL_TIER")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            topology_path: path("HUB_PLANNER_TOPOLOGY")?,
            hubs_path: path("HUB_PLANNER_HUBS")?,
            request_path: path("HUB_PLANNER_REQUEST")?,
            zone_id: std::env::var("HUB_PLANNER_ZONE_ID").ok(),
            dual_tier,
        })
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the plan
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = PlanSpokeConfig::from_env()?;
    info!("📋 Configuration loaded:");
    info!("  - Topology: {}", config.topology_path.display());
    info!("  - Hubs: {}", config.hubs_path.display());
    info!("  - Request: {}", config.request_path.display());

    let topology = TopologyModel::load(&config.topology_path).context("Failed to load topology")?;
    let resolver = StaticNetworkInstanceResolver::from_json(&read(&config.hubs_path)?)
        .context("Failed to load hub handles")?;
    info!("✅ Loaded {} hub handles", resolver.len());

    let request: SpokeAttachmentRequest = serde_json::from_str(&read(&config.request_path)?)
        .context("Failed to parse spoke attachment request")?;

    let service = HubPlanningService::new(topology, resolver);

    let attachment = if config.dual_tier {
        serde_json::to_value(service.plan_tools_dual_tier(&request)?)?
    } else {
        serde_json::to_value(service.plan_attachment(&request)?)?
    };

    let zone = match &config.zone_id {
        Some(zone_id) => {
            let zone_id = HostedZoneId::new(zone_id.as_str())?;
            Some(service.plan_zone_attachment(request.vpc_id(), &zone_id)?)
        }
        None => None,
    };

    let output = json!({
        "attachment": attachment,
        "zone_attachment": zone,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!("✅ Plan written for {}", request.identity());
    Ok(())
}
