//! Melee attack system.

use bevy::prelude::*;

use crate::ai::{AgentConfig, AgentState};
use crate::clock::SimClock;
use crate::combat::{Attacker, Dead, PlayerDamaged};
use crate::components::{face_direction, Agent, AgentHandle, Player};

/// Система: атаки агентов в состоянии Attacking
///
/// Агент поворачивается к игроку каждый тик; урон мгновенный,
/// не чаще одного раза за `attack_cooldown`.
pub fn agent_attacks(
    mut agents: Query<(Entity, &AgentState, &AgentConfig, &mut Attacker, &mut Transform), (With<Agent>, Without<Dead>)>,
    players: Query<&Transform, (With<Player>, Without<Agent>)>,
    mut player_damage: EventWriter<PlayerDamaged>,
    clock: Res<SimClock>,
) {
    let Some(player) = players.iter().next().map(|transform| transform.translation) else {
        return;
    };
    let now = clock.now();

    for (entity, state, config, mut attacker, mut transform) in agents.iter_mut() {
        if *state != AgentState::Attacking {
            continue;
        }

        let to_player = player - transform.translation;
        face_direction(&mut transform, to_player);

        if !attacker.can_attack(now, config.attack_cooldown) {
            continue;
        }

        attacker.start_attack(now);
        player_damage.write(PlayerDamaged {
            attacker: AgentHandle(entity),
            amount: config.attack_damage,
        });

        crate::logger::log(&format!(
            "🗡️ {:?} hits player for {} at t={:.2}",
            entity, config.attack_damage, now
        ));
    }
}
