//! Health агента

use bevy::prelude::*;

/// Здоровье агента
///
/// Инвариант: 0 ≤ current ≤ max. current == 0 ⇔ AgentState::Dead
/// (поддерживается через `combat::take_damage`, не трогайте current напрямую).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Saturating: health не уходит в минус
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}
