//! AI decision-making module
//!
//! FSM агента (Patrol / Chasing / Attacking / Dead) поверх perception cache
//! и patrol sampling. Движение живёт в navigation, удары в combat.

use bevy::prelude::*;

use crate::clock::{AgentTick, AgentTickSet};

pub mod components;
pub mod systems;
pub mod tuning;

// Re-export основных типов
pub use components::*;
pub use systems::{next_state, sample_patrol_point, PatrolSample, SampleError};
pub use tuning::AgentTuning;

/// AI Plugin
///
/// Порядок выполнения (AgentTick):
/// 1. refresh_agent_perception: throttled snapshot игрока (Perception set)
/// 2. agent_fsm_transitions: переходы по cached perception (Decision set)
/// 3. sample_patrol_targets: patrol цели для запросивших (Decision set)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AgentTuning>()
            .add_systems(
                AgentTick,
                systems::refresh_agent_perception.in_set(AgentTickSet::Perception),
            )
            .add_systems(
                AgentTick,
                (systems::agent_fsm_transitions, systems::sample_patrol_targets)
                    .chain()
                    .in_set(AgentTickSet::Decision),
            );
    }
}
