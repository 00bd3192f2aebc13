//! Navigation domain: navmesh queries, path planner, path follower.
//!
//! # Architecture
//!
//! - **query**: `NavigationQuery` trait (black-box navmesh service) + `NavigationService` resource
//! - **grid**: `GridNavigation`, reference backend (walkable cells, regions, A*)
//! - **path**: `NavPath` component, replan policy, path computation
//! - **systems**: `plan_agent_paths` / `follow_agent_paths` (AgentTick, Navigation set)
//!
//! Агенты никогда не мутируют navmesh: все запросы синхронные и read-only.

use bevy::prelude::*;

use crate::clock::{AgentTick, AgentTickSet};

pub mod grid;
pub mod path;
pub mod query;
pub mod systems;

#[cfg(test)]
mod grid_tests;

pub use grid::{GridNavigation, NavGrid};
pub use path::{compute_path, should_replan, step_along_path, NavPath, PathStep, PlanError, ReplanMode};
pub use query::{navigation_ready, NavigationQuery, NavigationService, RegionId, ZoneId};
pub use systems::{follow_agent_paths, plan_agent_paths};

/// Navigation Plugin
///
/// Порядок внутри AgentTickSet::Navigation:
/// 1. plan_agent_paths: решаем нужен ли replan, запрашиваем путь
/// 2. follow_agent_paths: двигаем агента к path[0]
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationService>().add_systems(
            AgentTick,
            (plan_agent_paths, follow_agent_paths)
                .chain()
                .in_set(AgentTickSet::Navigation),
        );
    }
}
