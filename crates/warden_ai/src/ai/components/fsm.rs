//! FSM AI components (state, per-agent config).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// AI FSM состояния агента
///
/// Ровно одно активно. Dead: терминальное (health == 0).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum AgentState {
    /// Patrol: бродим вокруг spawn точки (половина speed)
    #[default]
    Patrol,

    /// Chasing: преследуем игрока по navmesh (полная speed)
    Chasing,

    /// Attacking: игрок в attack radius, стоим и бьём по cooldown
    Attacking,

    /// Dead: health == 0, никаких апдейтов
    Dead,
}

impl AgentState {
    pub fn is_dead(&self) -> bool {
        matches!(self, AgentState::Dead)
    }
}

/// Параметры агента (копируются при спавне, дальше не меняются)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AgentConfig {
    /// Стартовое здоровье
    pub health: u32,
    /// Скорость преследования (м/с); patrol идёт на `AgentTuning::patrol_speed_factor` от неё
    pub speed: f32,
    /// Радиус патруля вокруг spawn точки (м)
    pub patrol_radius: f32,
    /// Радиус обнаружения игрока (м)
    pub detection_radius: f32,
    /// Радиус атаки (м)
    pub attack_radius: f32,
    /// Урон за удар
    pub attack_damage: u32,
    /// Cooldown между ударами (секунды)
    pub attack_cooldown: f32,
    /// Chasing → Patrol когда дистанция > detection_radius × multiplier (hysteresis)
    pub lose_interest_multiplier: f32,
    /// Patrol → Chasing только при line of sight (по умолчанию хватает дистанции)
    pub require_line_of_sight: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            health: 100,
            speed: 3.0,
            patrol_radius: 10.0,
            detection_radius: 15.0,
            attack_radius: 2.0,
            attack_damage: 10,
            attack_cooldown: 1.0,
            lose_interest_multiplier: 2.0,
            require_line_of_sight: false,
        }
    }
}

impl AgentConfig {
    /// Дистанция выхода из Chasing
    pub fn lose_interest_radius(&self) -> f32 {
        self.detection_radius * self.lose_interest_multiplier
    }
}
