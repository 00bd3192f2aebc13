//! Perception systems (throttled player snapshot).

use bevy::prelude::*;

use crate::ai::{AgentTuning, PerceptionCache};
use crate::clock::SimClock;
use crate::combat::Dead;
use crate::components::{Agent, Player};
use crate::physics::StaticColliders;

/// Система: обновление perception cache
///
/// Raycast + дистанция только когда snapshot старше `perception_interval`,
/// а не каждый тик для каждого агента.
pub fn refresh_agent_perception(
    mut agents: Query<(&Transform, &mut PerceptionCache), (With<Agent>, Without<Dead>)>,
    players: Query<&Transform, (With<Player>, Without<Agent>)>,
    colliders: Res<StaticColliders>,
    tuning: Res<AgentTuning>,
    clock: Res<SimClock>,
) {
    let now = clock.now();
    let player = players.iter().next().map(|transform| transform.translation);

    for (transform, mut cache) in agents.iter_mut() {
        if !cache.is_stale(now, tuning.perception_interval) {
            continue;
        }

        match player {
            Some(player_position) => cache.refresh(transform.translation, player_position, &colliders, now),
            None => cache.forget(now),
        }
    }
}
