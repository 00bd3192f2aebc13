//! Damage types: events, death markers, damage intake.

use bevy::prelude::*;

use crate::ai::AgentState;
use crate::components::{AgentHandle, Health};

/// Запрос урона агенту (от игрока, ловушек, скриптов)
///
/// Обрабатывается в `apply_agent_damage` (AgentTickSet::Combat).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageAgent {
    pub target: AgentHandle,
    pub amount: u32,
}

/// Агент ударил игрока (player collaborator применяет урон у себя)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDamaged {
    pub attacker: AgentHandle,
    pub amount: u32,
}

/// Агент умер: ровно один раз на агента
///
/// Хук для score/loot/cleanup подсистем.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AgentDied {
    pub agent: AgentHandle,
}

/// Компонент-маркер: агент мёртв (Health == 0)
///
/// Все системы агентов фильтруют `Without<Dead>`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Труп держится `AgentTuning::corpse_lifetime` секунд, чтобы accessors
/// (health/state/position) ещё отвечали для UI.
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    /// Время деспавна (секунды `SimClock`)
    pub despawn_time: f64,
}

/// Нанести урон агенту
///
/// Вычитает `amount` (clamp в 0). Если health дошёл до 0, агент переходит в Dead.
/// Урон по мёртвому агенту: no-op (нет отрицательного health, нет повторной смерти).
///
/// Возвращает `true` только если именно этот вызов убил агента.
pub fn take_damage(health: &mut Health, state: &mut AgentState, amount: u32) -> bool {
    if state.is_dead() {
        return false;
    }

    health.take_damage(amount);

    if health.is_alive() {
        return false;
    }

    *state = AgentState::Dead;
    true
}
