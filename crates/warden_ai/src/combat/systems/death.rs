//! Damage intake and death systems.

use bevy::prelude::*;

use crate::ai::{AgentState, AgentTuning, PatrolTarget, PerceptionCache};
use crate::clock::SimClock;
use crate::combat::{take_damage, AgentDied, Attacker, DamageAgent, Dead, DespawnAfter};
use crate::components::{Agent, AgentHandle, Health};
use crate::navigation::NavPath;

/// Система: применить входящий урон (DamageAgent events)
///
/// Урон по исчезнувшему entity или по трупу: no-op.
/// Смерть → AgentDied (ровно один раз, `take_damage` гарантирует).
pub fn apply_agent_damage(
    mut damage_events: EventReader<DamageAgent>,
    mut died_events: EventWriter<AgentDied>,
    mut agents: Query<(&mut Health, &mut AgentState), With<Agent>>,
) {
    for event in damage_events.read() {
        let entity = event.target.entity();
        let Ok((mut health, mut state)) = agents.get_mut(entity) else {
            crate::logger::log(&format!("DamageAgent for unknown agent {:?} ignored", entity));
            continue;
        };

        if take_damage(&mut health, &mut state, event.amount) {
            crate::logger::log_info(&format!("💀 Agent {:?} died", entity));
            died_events.write(AgentDied {
                agent: AgentHandle(entity),
            });
        }
    }
}

/// Система: отключение AI у мёртвых агентов
///
/// Удаляет behaviour компоненты (путь, perception, patrol, attacker),
/// вешает Dead + DespawnAfter. Health/AgentState/Transform остаются для accessors.
pub fn disable_ai_on_death(
    mut commands: Commands,
    mut death_events: EventReader<AgentDied>,
    tuning: Res<AgentTuning>,
    clock: Res<SimClock>,
) {
    let despawn_time = clock.now() + tuning.corpse_lifetime;

    for event in death_events.read() {
        if let Ok(mut entity_commands) = commands.get_entity(event.agent.entity()) {
            entity_commands
                .remove::<(NavPath, PerceptionCache, PatrolTarget, Attacker)>()
                .insert((Dead, DespawnAfter { despawn_time }));
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(mut commands: Commands, query: Query<(Entity, &DespawnAfter)>, clock: Res<SimClock>) {
    let current_time = clock.now();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
