//! Combat system module
//!
//! ECS ответственность:
//! - Game state: Health, Attacker (timestamp последней атаки)
//! - Combat rules: cooldown-gated melee, damage intake, death
//! - Events: DamageAgent (вход), PlayerDamaged / AgentDied (выход)
//!
//! Игрок является внешним коллаборатором: урон ему уходит событием `PlayerDamaged`,
//! урон агентам приходит событием `DamageAgent`.

use bevy::prelude::*;

use crate::clock::{AgentTick, AgentTickSet};

pub mod attacker;
pub mod damage;
pub mod systems;

// Re-export основных типов
pub use attacker::Attacker;
pub use damage::{take_damage, AgentDied, DamageAgent, Dead, DespawnAfter, PlayerDamaged};

/// Combat Plugin
///
/// Порядок выполнения (AgentTick):
/// 1. agent_attacks: атаки агентов в Attacking (Combat set)
/// 2. apply_agent_damage: входящий урон → AgentDied
/// 3. disable_ai_on_death: Dead + DespawnAfter, снятие AI компонентов
/// 4. despawn_after_timeout: уборка трупов (Cleanup set)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageAgent>()
            .add_event::<PlayerDamaged>()
            .add_event::<AgentDied>();

        app.add_systems(
            AgentTick,
            (
                systems::agent_attacks,
                systems::apply_agent_damage,
                systems::disable_ai_on_death,
            )
                .chain()
                .in_set(AgentTickSet::Combat),
        )
        .add_systems(
            AgentTick,
            systems::despawn_after_timeout.in_set(AgentTickSet::Cleanup),
        );
    }
}
