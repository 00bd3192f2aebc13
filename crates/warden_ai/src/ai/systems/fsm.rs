//! FSM AI systems (state transitions).

use bevy::prelude::*;

use crate::ai::{AgentConfig, AgentState, AgentTuning, PatrolTarget, PerceptionCache};
use crate::clock::SimClock;
use crate::combat::Dead;
use crate::components::Agent;
use crate::navigation::NavPath;

/// Следующее состояние по cached perception
///
/// Порядок проверок:
/// - Patrol → Chasing: distance ≤ detection (+ LOS если `require_line_of_sight`)
/// - Chasing → Patrol: distance > detection × multiplier (hysteresis)
/// - Chasing → Attacking: distance ≤ attack radius
/// - Attacking → Chasing: distance > attack radius
/// - Dead: терминальное
pub fn next_state(state: AgentState, config: &AgentConfig, perception: &PerceptionCache) -> AgentState {
    let distance = perception.distance;

    match state {
        AgentState::Dead => AgentState::Dead,

        AgentState::Patrol => {
            let in_range = distance <= config.detection_radius;
            let seen = !config.require_line_of_sight || perception.visible;
            if in_range && seen {
                AgentState::Chasing
            } else {
                AgentState::Patrol
            }
        }

        AgentState::Chasing => {
            if distance > config.lose_interest_radius() {
                AgentState::Patrol
            } else if distance <= config.attack_radius {
                AgentState::Attacking
            } else {
                AgentState::Chasing
            }
        }

        AgentState::Attacking => {
            if distance > config.attack_radius {
                AgentState::Chasing
            } else {
                AgentState::Attacking
            }
        }
    }
}

/// Система: AI FSM transitions
///
/// Один проход на агента за тик. Побочные эффекты переходов:
/// - Chasing → Patrol: сброс пути + запрос нового patrol target
/// - Chasing → Attacking: сброс пути (во время атаки не двигаемся)
/// - Patrol (без перехода): patrol target достигнут → запрос нового + сброс пути
///   (fallback цель держится `patrol_fallback_hold`)
pub fn agent_fsm_transitions(
    mut agents: Query<
        (
            Entity,
            &mut AgentState,
            &AgentConfig,
            &PerceptionCache,
            &Transform,
            &mut PatrolTarget,
            &mut NavPath,
        ),
        (With<Agent>, Without<Dead>),
    >,
    tuning: Res<AgentTuning>,
    clock: Res<SimClock>,
) {
    let now = clock.now();
    for (entity, mut state, config, perception, transform, mut patrol, mut path) in agents.iter_mut() {
        let current = *state;
        let new_state = next_state(current, config, perception);

        if new_state == current {
            if current == AgentState::Patrol && !patrol.needs_resample && patrol.can_resample(now) {
                let reached = patrol
                    .point
                    .is_some_and(|point| transform.translation.distance(point) <= tuning.patrol_arrival_distance);
                if reached {
                    patrol.request();
                    path.clear();
                }
            }
            continue;
        }

        match (current, new_state) {
            (AgentState::Chasing, AgentState::Patrol) => {
                crate::logger::log(&format!(
                    "🚶 {:?} Chasing → Patrol (player lost at {:.1}m)",
                    entity, perception.distance
                ));
                path.clear();
                patrol.request();
            }
            (AgentState::Chasing, AgentState::Attacking) => {
                crate::logger::log(&format!("⚔️ {:?} Chasing → Attacking", entity));
                path.clear();
            }
            (from, to) => {
                crate::logger::log(&format!(
                    "🔍 {:?} {:?} → {:?} (distance {:.1}m)",
                    entity, from, to, perception.distance
                ));
            }
        }

        *state = new_state;
    }
}
