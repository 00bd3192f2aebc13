//! Patrol target sampling.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::ai::{AgentConfig, AgentTuning, PatrolTarget, SpawnAnchor};
use crate::clock::SimClock;
use crate::combat::Dead;
use crate::components::Agent;
use crate::navigation::NavigationService;
use crate::DeterministicRng;

/// Откуда взялась patrol цель
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolSample {
    /// Один из принятых случайных кандидатов
    Sampled(Vec3),
    /// Ни один кандидат не прошёл: ближайшая walkable точка к spawn
    Fallback(Vec3),
}

impl PatrolSample {
    pub fn point(&self) -> Vec3 {
        match *self {
            PatrolSample::Sampled(point) | PatrolSample::Fallback(point) => point,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    #[error("agent at {0} is not inside any navigation region")]
    NoRegion(Vec3),
    #[error("no navigable point near spawn {0}")]
    NoFallback(Vec3),
}

/// Подобрать достижимую patrol точку вокруг spawn
///
/// Кандидаты равномерны по диску (radius = R × sqrt(rand)), снапаются на
/// navmesh региона агента; принимаются если дальше `patrol_min_distance` от агента
/// и не дальше R + margin от spawn. Из принятых: равновероятный выбор.
pub fn sample_patrol_point<R: Rng + ?Sized>(
    nav: &NavigationService,
    rng: &mut R,
    position: Vec3,
    spawn: Vec3,
    patrol_radius: f32,
    tuning: &AgentTuning,
) -> Result<PatrolSample, SampleError> {
    let region = nav.region_of(position).ok_or(SampleError::NoRegion(position))?;

    let max_from_spawn = patrol_radius + tuning.patrol_radius_margin;
    let mut accepted = Vec::with_capacity(tuning.patrol_sample_attempts as usize);

    for _ in 0..tuning.patrol_sample_attempts {
        let radius = patrol_radius * rng.gen::<f32>().sqrt();
        let angle = rng.gen::<f32>() * TAU;
        let candidate = spawn + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);

        let Some(snapped) = nav.nearest_navigable_point(Some(region), candidate) else {
            continue;
        };

        if snapped.distance(position) > tuning.patrol_min_distance && snapped.distance(spawn) <= max_from_spawn {
            accepted.push(snapped);
        }
    }

    if let Some(&point) = accepted.choose(rng) {
        return Ok(PatrolSample::Sampled(point));
    }

    nav.nearest_navigable_point(Some(region), spawn)
        .map(PatrolSample::Fallback)
        .ok_or(SampleError::NoFallback(spawn))
}

/// Система: выдать patrol target агентам, которые его запросили
///
/// Неудача (агент вне navmesh) не фатальна: флаг остаётся, пробуем в следующем тике.
/// Fallback цель держится `patrol_fallback_hold` секунд (patrol_radius = 0, крошечный остров).
pub fn sample_patrol_targets(
    mut agents: Query<(Entity, &Transform, &SpawnAnchor, &AgentConfig, &mut PatrolTarget), (With<Agent>, Without<Dead>)>,
    nav: Res<NavigationService>,
    tuning: Res<AgentTuning>,
    mut rng: ResMut<DeterministicRng>,
    clock: Res<SimClock>,
) {
    for (entity, transform, anchor, config, mut patrol) in agents.iter_mut() {
        if !patrol.needs_resample {
            continue;
        }

        match sample_patrol_point(&nav, &mut rng.rng, transform.translation, anchor.0, config.patrol_radius, &tuning) {
            Ok(PatrolSample::Sampled(point)) => patrol.assign(point),
            Ok(PatrolSample::Fallback(point)) => {
                crate::logger::log_warning(&format!(
                    "{:?}: no patrol candidate accepted, holding fallback {:.1?}",
                    entity, point
                ));
                patrol.hold(point, clock.now() + tuning.patrol_fallback_hold);
            }
            Err(error) => {
                crate::logger::log_warning(&format!("{:?}: patrol sampling failed: {} (retry next tick)", entity, error));
            }
        }
    }
}
