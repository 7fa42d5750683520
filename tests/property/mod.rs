// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Planning properties: determinism, default-route exclusivity,
//! cross-region completeness, connector directionality, zone ordering.

mod plan_properties;
