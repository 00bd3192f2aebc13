//! Attacker component: cooldown-gated melee атаки агента
//!
//! Урон и cooldown берутся из `AgentConfig`; здесь только timestamp
//! последней атаки (в секундах `SimClock`).

use bevy::prelude::*;

/// Attacker: состояние атак агента
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Attacker {
    /// Время последней успешной атаки (NEG_INFINITY: ещё не атаковал)
    pub last_attack_time: f64,
}

impl Default for Attacker {
    fn default() -> Self {
        Self {
            last_attack_time: f64::NEG_INFINITY,
        }
    }
}

impl Attacker {
    /// Может ли атаковать (прошло ≥ cooldown с последней атаки)
    pub fn can_attack(&self, now: f64, cooldown: f32) -> bool {
        now - self.last_attack_time >= cooldown as f64
    }

    /// Начать атаку (запомнить время)
    pub fn start_attack(&mut self, now: f64) {
        self.last_attack_time = now;
    }
}
