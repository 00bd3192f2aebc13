//! Integration тесты agent core
//!
//! Headless App + AgentSimulationPlugin, тики вручную через `tick(world, delta)`.

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use warden_ai::ai::{PatrolTarget, SpawnAnchor};
use warden_ai::lifecycle::PendingSpawn;
use warden_ai::navigation::NavPath;
use warden_ai::{
    agent_health, agent_position, agent_state, create_headless_app, spawn_agent, tick, AgentConfig, AgentDied,
    AgentHandle, AgentRoster, AgentSimulationPlugin, AgentState, ColliderShape, DamageAgent, GridNavigation, NavGrid,
    NavigationService, Player, PlayerDamaged, SpawnTable, StaticColliders, ZoneId,
};

const DT: f32 = 1.0 / 60.0;

fn open_navigation(half_extent: f32) -> NavigationService {
    let grid = NavGrid::centered(half_extent, 1.0);
    NavigationService::new(ZoneId(0), GridNavigation::new().with_zone(ZoneId(0), grid))
}

/// App без стандартной spawn table (агенты только те, что спавнит тест)
fn scenario_app(navigation: NavigationService) -> App {
    let mut app = create_headless_app(7);
    app.insert_resource(SpawnTable::empty())
        .insert_resource(navigation)
        .add_plugins(AgentSimulationPlugin);
    app
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut().spawn((Player, Transform::from_translation(position))).id()
}

fn move_player(app: &mut App, player: Entity, position: Vec3) {
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(player) {
        transform.translation = position;
    }
}

fn spawn(app: &mut App, position: Vec3, config: AgentConfig) -> AgentHandle {
    spawn_agent(&mut app.world_mut().commands(), position, config)
}

fn run(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        tick(app.world_mut(), DT);
    }
}

fn state(app: &App, agent: AgentHandle) -> Option<AgentState> {
    agent_state(app.world(), agent)
}

fn cursor<E: Event>(app: &App) -> EventCursor<E> {
    app.world().resource::<Events<E>>().get_cursor()
}

/// Новые события с прошлого чтения (читать после каждого тика: буферы живут два тика)
fn read_new<E: Event + Clone>(app: &App, cursor: &mut EventCursor<E>) -> Vec<E> {
    cursor.read(app.world().resource::<Events<E>>()).cloned().collect()
}

#[test]
fn test_detection_switches_to_chasing() {
    let mut app = scenario_app(open_navigation(40.0));
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -10.0));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    run(&mut app, 2);

    assert_eq!(state(&app, agent), Some(AgentState::Chasing));
}

#[test]
fn test_player_outside_detection_keeps_patrol() {
    let mut app = scenario_app(open_navigation(40.0));
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -16.0));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    run(&mut app, 10);

    // Patrol движется на половине speed; за 10 тиков до 15м не дойти
    assert_eq!(state(&app, agent), Some(AgentState::Patrol));
}

#[test]
fn test_lost_chase_returns_to_patrol() {
    let mut app = scenario_app(open_navigation(60.0));
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -5.0));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    run(&mut app, 2);
    assert_eq!(state(&app, agent), Some(AgentState::Chasing));

    move_player(&mut app, player, Vec3::new(0.0, 0.0, -35.0));
    run(&mut app, 10); // perception interval 0.1s = 6 тиков

    assert_eq!(state(&app, agent), Some(AgentState::Patrol));

    // Новый patrol target уже выдан sampler'ом в том же тике
    let entity = app.world().entity(agent.entity());
    let patrol = entity.get::<PatrolTarget>().unwrap();
    let spawn_point = entity.get::<SpawnAnchor>().unwrap().0;
    let point = patrol.point.unwrap();
    assert!(!patrol.needs_resample);
    assert!(point.distance(spawn_point) <= AgentConfig::default().patrol_radius + 1.0 + 1e-3);
}

#[test]
fn test_chase_hysteresis_between_radii() {
    let mut app = scenario_app(open_navigation(60.0));
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -5.0));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    run(&mut app, 2);
    assert_eq!(state(&app, agent), Some(AgentState::Chasing));

    // Дальше detection (15), но ближе lose interest (30)
    move_player(&mut app, player, Vec3::new(0.0, 0.0, -22.0));
    for _ in 0..60 {
        run(&mut app, 1);
        assert_eq!(state(&app, agent), Some(AgentState::Chasing));
    }
}

#[test]
fn test_attack_cadence_respects_cooldown() {
    let mut app = scenario_app(open_navigation(20.0));
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -1.5));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    let mut hits_cursor = cursor::<PlayerDamaged>(&app);
    let mut hits = Vec::new();

    // Ждём входа в Attacking; удары тика входа уже считаются
    let mut attacking = false;
    for _ in 0..10 {
        run(&mut app, 1);
        let new_hits = read_new(&app, &mut hits_cursor);
        if state(&app, agent) == Some(AgentState::Attacking) {
            hits.extend(new_hits);
            attacking = true;
            break;
        }
    }
    assert!(attacking, "agent never started attacking");

    // 3.5s в Attacking при 60 тиках/с = 210 тиков (включая тик входа)
    for _ in 0..209 {
        run(&mut app, 1);
        hits.extend(read_new(&app, &mut hits_cursor));
    }

    assert_eq!(state(&app, agent), Some(AgentState::Attacking));
    assert_eq!(hits.len(), 4);
    assert!(hits.iter().all(|hit| hit.amount == 10 && hit.attacker == agent));
}

#[test]
fn test_path_recompute_is_throttled() {
    let mut app = scenario_app(open_navigation(40.0));
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -12.0));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    run(&mut app, 2);
    assert_eq!(state(&app, agent), Some(AgentState::Chasing));

    let baseline = app.world().get::<NavPath>(agent.entity()).unwrap().recompute_count;

    // Игрок прыгает на 20м каждый тик: replan нужен всегда, ограничивает только cooldown
    const WINDOW_TICKS: u32 = 180; // 3 секунды
    for step in 0..WINDOW_TICKS {
        let x = if step % 2 == 0 { -10.0 } else { 10.0 };
        move_player(&mut app, player, Vec3::new(x, 0.0, -12.0));
        run(&mut app, 1);

        // Непустой путь всегда заканчивается в своей цели
        let path = app.world().get::<NavPath>(agent.entity()).unwrap();
        if let (Some(last), Some(target)) = (path.waypoints.back(), path.target) {
            assert!(last.distance(target) < 1e-3);
        }
    }

    assert_eq!(state(&app, agent), Some(AgentState::Chasing));

    let recomputes = app.world().get::<NavPath>(agent.entity()).unwrap().recompute_count - baseline;
    let bound = (3.0_f64 / 0.15).ceil() as u32;
    assert!(recomputes <= bound, "recomputes = {}, bound = {}", recomputes, bound);
    assert!(recomputes >= bound / 2, "recomputes = {}", recomputes);
}

#[test]
fn test_line_of_sight_gate() {
    let wall = ColliderShape::Cuboid {
        center: Vec3::new(0.0, 1.0, -5.0),
        half_extents: Vec3::new(3.0, 2.0, 0.5),
    };

    let mut app = create_headless_app(7);
    app.insert_resource(SpawnTable::empty())
        .insert_resource(open_navigation(40.0))
        .insert_resource(StaticColliders::new().with(wall))
        .add_plugins(AgentSimulationPlugin);

    spawn_player(&mut app, Vec3::new(0.0, 0.0, -10.0));
    let blind = spawn(
        &mut app,
        Vec3::ZERO,
        AgentConfig {
            require_line_of_sight: true,
            ..default()
        },
    );
    let deaf_to_walls = spawn(&mut app, Vec3::new(0.5, 0.0, 0.0), AgentConfig::default());

    run(&mut app, 2);

    assert_eq!(state(&app, blind), Some(AgentState::Patrol));
    assert_eq!(state(&app, deaf_to_walls), Some(AgentState::Chasing));
}

#[test]
fn test_patrol_stays_near_spawn() {
    let mut app = scenario_app(open_navigation(40.0));
    let spawn_point = Vec3::new(5.0, 0.0, 5.0);
    let agent = spawn(&mut app, spawn_point, AgentConfig::default());

    let mut max_distance: f32 = 0.0;
    for _ in 0..600 {
        run(&mut app, 1);
        let position = agent_position(app.world(), agent).unwrap();
        max_distance = max_distance.max(position.distance(spawn_point));
    }

    assert_eq!(state(&app, agent), Some(AgentState::Patrol));
    assert!(max_distance > 1.0, "agent never left spawn");
    // patrol radius 10 + margin 1 + допуск на ступеньки grid пути
    assert!(max_distance <= 12.0, "max distance = {}", max_distance);
}

#[test]
fn test_health_zero_iff_dead() {
    let mut app = scenario_app(open_navigation(40.0));
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -8.0));
    let agents: Vec<_> = (0..4)
        .map(|i| spawn(&mut app, Vec3::new(i as f32 * 3.0, 0.0, 0.0), AgentConfig::default()))
        .collect();

    for step in 0..240u32 {
        for (i, agent) in agents.iter().enumerate() {
            if step % (10 + i as u32 * 7) == 0 {
                app.world_mut().send_event(DamageAgent {
                    target: *agent,
                    amount: 9 + i as u32 * 4,
                });
            }
        }
        run(&mut app, 1);

        for agent in &agents {
            let health = agent_health(app.world(), *agent).unwrap();
            let current = state(&app, *agent).unwrap();
            assert_eq!(health == 0, current == AgentState::Dead, "agent {:?}", agent);
        }
    }

    // Хотя бы один умер за 4 секунды
    assert!(agents
        .iter()
        .any(|agent| state(&app, *agent) == Some(AgentState::Dead)));
}

#[test]
fn test_agent_died_fires_once_and_corpse_is_removed() {
    let mut app = scenario_app(open_navigation(20.0));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());
    run(&mut app, 1);
    assert!(app.world().resource::<AgentRoster>().contains(agent));

    let mut died_cursor = cursor::<AgentDied>(&app);
    let mut died = Vec::new();

    app.world_mut().send_event(DamageAgent { target: agent, amount: 150 });
    app.world_mut().send_event(DamageAgent { target: agent, amount: 150 });
    run(&mut app, 1);
    died.extend(read_new(&app, &mut died_cursor));

    assert_eq!(died, vec![AgentDied { agent }]);
    assert_eq!(agent_health(app.world(), agent), Some(0));
    assert_eq!(state(&app, agent), Some(AgentState::Dead));
    assert!(!app.world().resource::<AgentRoster>().contains(agent));

    // Урон по трупу: no-op, повторной смерти нет
    app.world_mut().send_event(DamageAgent { target: agent, amount: 10 });
    run(&mut app, 1);
    died.extend(read_new(&app, &mut died_cursor));
    assert_eq!(died.len(), 1);
    assert_eq!(agent_health(app.world(), agent), Some(0));

    // Труп уходит через corpse_lifetime (5s)
    let corpse_position = agent_position(app.world(), agent);
    assert!(corpse_position.is_some());
    run(&mut app, 5 * 60 + 2);
    assert_eq!(agent_position(app.world(), agent), None);
    assert_eq!(state(&app, agent), None);
}

#[test]
fn test_unready_navigation_defers_spawning() {
    let mut app = create_headless_app(7);
    app.insert_resource(NavigationService::default())
        .add_plugins(AgentSimulationPlugin); // стандартная spawn table (3 слота)

    let agent = spawn(&mut app, Vec3::new(1.0, 0.0, 1.0), AgentConfig::default());
    run(&mut app, 30);

    assert!(app.world().resource::<AgentRoster>().is_empty());
    assert!(app.world().get::<PendingSpawn>(agent.entity()).is_some());
    assert!(app.world().resource::<SpawnTable>().slots.iter().all(|slot| !slot.spawned));

    // Навигация загрузилась: всё спавнится в первом же тике
    app.world_mut().insert_resource(open_navigation(40.0));
    run(&mut app, 1);

    assert_eq!(app.world().resource::<AgentRoster>().len(), 4);
    assert!(app.world().get::<PendingSpawn>(agent.entity()).is_none());
    assert!(app.world().resource::<SpawnTable>().slots.iter().all(|slot| slot.spawned && slot.instance.is_some()));
}

#[test]
fn test_off_mesh_spawn_is_snapped() {
    let mut app = scenario_app(open_navigation(10.0));
    let agent = spawn(&mut app, Vec3::new(100.0, 0.0, 0.0), AgentConfig::default());

    run(&mut app, 1);

    let anchor = app.world().get::<SpawnAnchor>(agent.entity()).unwrap().0;
    assert!((anchor.x - 10.0).abs() < 0.01, "anchor = {:?}", anchor);
    assert!(app.world().resource::<AgentRoster>().contains(agent));
}

#[test]
fn test_event_buffers_stay_bounded_under_tick() {
    let mut app = scenario_app(open_navigation(20.0));
    spawn_player(&mut app, Vec3::new(0.0, 0.0, -1.5));
    let agent = spawn(&mut app, Vec3::ZERO, AgentConfig::default());

    let mut hits_cursor = cursor::<PlayerDamaged>(&app);
    let mut hits = 0;

    // 100 секунд: урон каждый тик (нулевой, агент живёт), агент бьёт раз в секунду
    for _ in 0..6000 {
        app.world_mut().send_event(DamageAgent { target: agent, amount: 0 });
        run(&mut app, 1);
        hits += read_new(&app, &mut hits_cursor).len();

        assert!(app.world().resource::<Events<DamageAgent>>().len() <= 2);
        assert!(app.world().resource::<Events<PlayerDamaged>>().len() <= 2);
    }

    assert_eq!(state(&app, agent), Some(AgentState::Attacking));
    assert!(hits >= 95, "hits = {}", hits);
    assert_eq!(agent_health(app.world(), agent), Some(AgentConfig::default().health));
}
