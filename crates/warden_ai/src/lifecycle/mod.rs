//! Lifecycle manager: spawn, activation, roster, death cleanup.
//!
//! Агенты спавнятся только когда navigation zone готова: весь `AgentTick`
//! гейтится `navigation_ready`, до этого PendingSpawn просто ждут.

use bevy::prelude::*;

use crate::clock::{AgentTick, AgentTickSet};

pub mod roster;
pub mod spawn;


pub use roster::{agent_health, agent_position, agent_state, release_dead_agents, AgentRoster};
pub use spawn::{
    activate_pending_agents, spawn_agent, spawn_configured_agents, validate_spawn_point, PendingSpawn, SpawnError,
    SpawnSlot, SpawnTable,
};

/// Lifecycle Plugin
///
/// Порядок выполнения (AgentTick):
/// 1. spawn_configured_agents: слоты SpawnTable (Lifecycle set)
/// 2. activate_pending_agents: snapping + AI компоненты (Lifecycle set)
/// 3. release_dead_agents: roster/slot cleanup после смертей (Cleanup set)
pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AgentRoster>()
            .init_resource::<SpawnTable>()
            .add_systems(
                AgentTick,
                (spawn_configured_agents, activate_pending_agents)
                    .chain()
                    .in_set(AgentTickSet::Lifecycle),
            )
            .add_systems(AgentTick, release_dead_agents.in_set(AgentTickSet::Cleanup));
    }
}
