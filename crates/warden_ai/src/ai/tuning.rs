//! Глобальные константы agent core (одни на все типы агентов).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::navigation::path::ReplanPolicy;

/// Resource: throttling интервалы и допуски
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentTuning {
    /// Как часто пересчитывается perception cache (секунды)
    pub perception_interval: f64,
    /// Минимальный интервал между пересчётами пути (секунды)
    pub path_recompute_cooldown: f64,
    /// Chasing: replan когда игрок сместился дальше (м)
    pub chase_replan_distance: f32,
    /// Patrol: replan когда patrol target сменился дальше (м)
    pub patrol_replan_tolerance: f32,
    /// Waypoint считается достигнутым ближе этого (м)
    pub arrival_tolerance: f32,
    /// Patrol target считается достигнутым ближе этого (м)
    pub patrol_arrival_distance: f32,
    /// Сколько кандидатов пробует patrol sampler
    pub patrol_sample_attempts: u32,
    /// Patrol target должен быть дальше этого от агента (м)
    pub patrol_min_distance: f32,
    /// Допуск к patrol_radius после snap на navmesh (м)
    pub patrol_radius_margin: f32,
    /// Пауза перед новым sampling, если выдана fallback цель (секунды)
    pub patrol_fallback_hold: f64,
    /// Доля speed в Patrol
    pub patrol_speed_factor: f32,
    /// Сколько труп лежит до despawn (секунды)
    pub corpse_lifetime: f64,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            perception_interval: 0.1,
            path_recompute_cooldown: 0.15,
            chase_replan_distance: 3.5,
            patrol_replan_tolerance: 0.5,
            arrival_tolerance: 0.5,
            patrol_arrival_distance: 1.0,
            patrol_sample_attempts: 25,
            patrol_min_distance: 3.0,
            patrol_radius_margin: 1.0,
            patrol_fallback_hold: 1.0,
            patrol_speed_factor: 0.5,
            corpse_lifetime: 5.0,
        }
    }
}

impl AgentTuning {
    pub fn replan_policy(&self) -> ReplanPolicy {
        ReplanPolicy {
            cooldown: self.path_recompute_cooldown,
            chase_threshold: self.chase_replan_distance,
            patrol_tolerance: self.patrol_replan_tolerance,
        }
    }
}
