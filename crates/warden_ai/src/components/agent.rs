//! Agent marker + handle

use bevy::prelude::*;

/// Маркер: entity управляется agent core (AI FSM + navigation)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Agent;

/// Handle агента для внешних подсистем (UI, score, loot)
///
/// Просто обёртка над Entity: коллабораторы не должны
/// лезть в компоненты агента напрямую, только через accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentHandle(pub Entity);

impl AgentHandle {
    pub fn entity(&self) -> Entity {
        self.0
    }
}

impl From<Entity> for AgentHandle {
    fn from(entity: Entity) -> Self {
        Self(entity)
    }
}

/// Facing angle (yaw, радианы): всегда выводится из Transform, отдельно не хранится
pub fn facing_angle(transform: &Transform) -> f32 {
    let forward = transform.forward();
    f32::atan2(-forward.x, -forward.z)
}

/// Повернуть transform по горизонтальному направлению движения
///
/// Вертикальная компонента игнорируется (агент не наклоняется на склонах).
pub fn face_direction(transform: &mut Transform, direction: Vec3) {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() > 1e-6 {
        transform.look_to(flat, Vec3::Y);
    }
}
