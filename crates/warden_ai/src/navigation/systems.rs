//! Navigation systems (planner + follower).

use bevy::prelude::*;

use super::path::{compute_path, should_replan, step_along_path, NavPath, PathStep, ReplanMode};
use super::query::NavigationService;
use crate::ai::{ground_position, AgentConfig, AgentState, AgentTuning, PatrolTarget};
use crate::clock::SimClock;
use crate::combat::Dead;
use crate::components::{face_direction, Agent, Player};

/// Система: path planner
///
/// Patrol → путь к patrol target; Chasing → путь к live ground position игрока.
/// Attacking/Dead путь не планируют (FSM уже очистил его).
/// Navigation service дёргается только когда `should_replan` разрешает.
pub fn plan_agent_paths(
    mut agents: Query<(Entity, &AgentState, &Transform, &PatrolTarget, &mut NavPath), (With<Agent>, Without<Dead>)>,
    players: Query<&Transform, (With<Player>, Without<Agent>)>,
    nav: Res<NavigationService>,
    tuning: Res<AgentTuning>,
    clock: Res<SimClock>,
) {
    let now = clock.now();
    let policy = tuning.replan_policy();
    let player_ground = players.iter().next().map(|player| ground_position(player.translation));

    for (entity, state, transform, patrol, mut path) in agents.iter_mut() {
        let (target, mode) = match state {
            AgentState::Patrol => {
                let Some(point) = patrol.point else {
                    continue;
                };
                (point, ReplanMode::Patrol)
            }
            AgentState::Chasing => {
                let Some(player) = player_ground else {
                    continue;
                };
                (player, ReplanMode::Chase)
            }
            AgentState::Attacking | AgentState::Dead => continue,
        };

        if !should_replan(&path, target, mode, &policy, now) {
            continue;
        }

        path.mark_recomputed(now);
        match compute_path(&nav, transform.translation, target) {
            Ok((waypoints, end)) => {
                crate::logger::log(&format!(
                    "🧭 {:?} {:?}: new path to {:.1?} ({} waypoints)",
                    entity,
                    mode,
                    end,
                    waypoints.len()
                ));
                path.assign_towards(waypoints, end, target);
            }
            Err(error) => {
                // Не фатально: стоим на месте до следующего разрешённого replan
                crate::logger::log_warning(&format!("{:?}: path planning failed: {}", entity, error));
                path.clear();
            }
        }
    }
}

/// Система: path follower
///
/// Двигает агента к path[0] со скоростью состояния (patrol: половина speed).
/// Поворот выводится из направления движения.
pub fn follow_agent_paths(
    mut agents: Query<(&AgentState, &AgentConfig, &mut Transform, &mut NavPath), (With<Agent>, Without<Dead>)>,
    tuning: Res<AgentTuning>,
    clock: Res<SimClock>,
) {
    for (state, config, mut transform, mut path) in agents.iter_mut() {
        let speed = match state {
            AgentState::Patrol => config.speed * tuning.patrol_speed_factor,
            AgentState::Chasing => config.speed,
            AgentState::Attacking | AgentState::Dead => continue,
        };

        let mut position = transform.translation;
        if let PathStep::Moved { direction, .. } =
            step_along_path(&mut position, &mut path, speed, clock.delta, tuning.arrival_tolerance)
        {
            transform.translation = position;
            face_direction(&mut transform, direction);
        }
    }
}
