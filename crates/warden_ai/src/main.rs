//! Headless демо agent core
//!
//! Grid navmesh со стеной, стандартная spawn table, игрок ходит по кругу
//! и иногда бьёт ближайшего агента. Раз в 2 секунды печатаем состояние.

use bevy::prelude::*;
use warden_ai::{
    agent_health, agent_position, agent_state, create_headless_app, tick, AgentRoster, AgentSimulationPlugin,
    ColliderShape, DamageAgent, GridNavigation, NavGrid, NavigationService, Player, PlayerDamaged, StaticColliders,
    ZoneId,
};

const TICK_RATE: f32 = 60.0;
const DURATION_SECS: f32 = 30.0;

/// Мир 60×60 со стеной поперёк (проход у правого края)
fn build_navigation() -> NavigationService {
    let grid = NavGrid::centered(30.0, 1.0).with_blocked_rect(Vec2::new(-30.0, -8.5), Vec2::new(20.0, -7.5));
    NavigationService::new(ZoneId(0), GridNavigation::new().with_zone(ZoneId(0), grid))
}

fn build_colliders() -> StaticColliders {
    StaticColliders::new().with(ColliderShape::Cuboid {
        center: Vec3::new(-5.0, 1.0, -8.0),
        half_extents: Vec3::new(25.0, 1.0, 0.5),
    })
}

fn player_position(t: f32) -> Vec3 {
    let angle = t * 0.3;
    Vec3::new(angle.cos() * 12.0, 0.0, angle.sin() * 12.0 - 5.0)
}

fn main() {
    let seed = 42;
    println!("Starting warden agent demo (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(build_navigation())
        .insert_resource(build_colliders())
        .add_plugins(AgentSimulationPlugin);

    let player = app
        .world_mut()
        .spawn((Player, Transform::from_translation(player_position(0.0))))
        .id();

    let delta = 1.0 / TICK_RATE;
    let total_ticks = (DURATION_SECS * TICK_RATE) as u32;
    let mut hits_taken = 0;

    for step in 0..total_ticks {
        let t = step as f32 * delta;
        let world = app.world_mut();

        if let Some(mut transform) = world.get_mut::<Transform>(player) {
            transform.translation = player_position(t);
        }

        // Каждые 3 секунды игрок бьёт первого агента из roster
        if step % (3 * TICK_RATE as u32) == 0 {
            if let Some(&target) = world.resource::<AgentRoster>().handles().first() {
                world.send_event(DamageAgent { target, amount: 35 });
            }
        }

        tick(world, delta);

        hits_taken += world.resource_mut::<Events<PlayerDamaged>>().drain().count();

        if step % (2 * TICK_RATE as u32) == 0 {
            let world = app.world();
            let roster = world.resource::<AgentRoster>();
            println!("t={:>5.1}s: {} active agents, player hit {} times", t, roster.len(), hits_taken);

            for &agent in roster.handles() {
                println!(
                    "  {:?}: {:?} hp={:?} at {:.1?}",
                    agent.entity(),
                    agent_state(world, agent),
                    agent_health(world, agent),
                    agent_position(world, agent)
                );
            }
        }
    }

    println!("Demo complete!");
}
