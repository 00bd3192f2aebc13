//! Perception cache: throttled snapshot того, что агент "знает" об игроке.

use bevy::prelude::*;

use crate::physics::{ColliderHandle, StaticColliders};

/// Проекция на землю (вертикальная компонента = 0)
pub fn ground_position(position: Vec3) -> Vec3 {
    Vec3::new(position.x, 0.0, position.z)
}

/// Snapshot perception агента
///
/// Пересчитывается не чаще `AgentTuning::perception_interval`.
/// FSM читает только эти значения, синхронный пересчёт посреди тика запрещён.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PerceptionCache {
    /// Ground position игрока на момент snapshot
    pub player_position: Vec3,
    /// Дистанция агент → player_position
    pub distance: f32,
    /// Line of sight до игрока
    pub visible: bool,
    /// Коллайдер, перекрывший LOS (если есть)
    pub blocker: Option<ColliderHandle>,
    /// Когда snapshot был сделан
    pub timestamp: f64,
}

impl Default for PerceptionCache {
    /// "Ничего не знаем": бесконечная дистанция, stale с первого тика
    fn default() -> Self {
        Self {
            player_position: Vec3::ZERO,
            distance: f32::INFINITY,
            visible: false,
            blocker: None,
            timestamp: f64::NEG_INFINITY,
        }
    }
}

impl PerceptionCache {
    pub fn is_stale(&self, now: f64, interval: f64) -> bool {
        now - self.timestamp > interval
    }

    /// Пересчитать snapshot: ground position, дистанция, LOS raycast
    pub fn refresh(&mut self, agent_position: Vec3, player_position: Vec3, colliders: &StaticColliders, now: f64) {
        let target = ground_position(player_position);
        let to_target = target - agent_position;
        let distance = to_target.length();

        let blocker = if distance > f32::EPSILON {
            colliders
                .first_hit(agent_position, to_target, distance)
                .map(|hit| hit.collider)
        } else {
            None
        };

        self.player_position = target;
        self.distance = distance;
        self.visible = blocker.is_none();
        self.blocker = blocker;
        self.timestamp = now;
    }

    /// Игрока нет в мире: забываем его
    pub fn forget(&mut self, now: f64) {
        self.distance = f32::INFINITY;
        self.visible = false;
        self.blocker = None;
        self.timestamp = now;
    }
}
