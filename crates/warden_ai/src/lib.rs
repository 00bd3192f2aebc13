//! Warden agent core
//!
//! ECS-симуляция враждебных агентов на Bevy 0.16:
//! patrol вокруг spawn, преследование игрока по navmesh, melee атаки по cooldown.
//!
//! Внешние коллабораторы (не принадлежат core):
//! - Navigation Query Service → `navigation::NavigationQuery`
//! - Player → entity с `Player` маркером, урон уходит событием `PlayerDamaged`
//! - Static colliders → `physics::StaticColliders`

use bevy::ecs::schedule::ExecutorKind;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod combat;
pub mod components;
pub mod lifecycle;
pub mod logger;
pub mod navigation;
pub mod physics;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AgentConfig, AgentState, AgentTuning};
pub use clock::{run_agent_tick, tick, AgentTick, AgentTickSet, SimClock};
pub use combat::{take_damage, AgentDied, CombatPlugin, DamageAgent, Dead, PlayerDamaged};
pub use components::*;
pub use lifecycle::{
    agent_health, agent_position, agent_state, spawn_agent, AgentRoster, LifecyclePlugin, SpawnTable,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{navigation_ready, GridNavigation, NavGrid, NavigationPlugin, NavigationQuery, NavigationService, ZoneId};
pub use physics::{ColliderShape, StaticColliders};

/// Главный plugin agent core (объединяет все подсистемы)
///
/// `AgentTick` выполняется single-threaded: порядок агентов внутри тика
/// и порядок фаз фиксированы (детерминизм при одинаковом seed).
/// Все фазы гейтятся `navigation_ready`.
pub struct AgentSimulationPlugin;

impl Plugin for AgentSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_schedule(AgentTick);
        app.edit_schedule(AgentTick, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

        app.configure_sets(
            AgentTick,
            (
                AgentTickSet::Lifecycle,
                AgentTickSet::Perception,
                AgentTickSet::Decision,
                AgentTickSet::Navigation,
                AgentTickSet::Combat,
                AgentTickSet::Cleanup,
            )
                .chain()
                .distributive_run_if(navigation_ready),
        );

        // Детерминистичный RNG (seed по умолчанию, если хост не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<SimClock>()
            .init_resource::<StaticColliders>()
            // Подсистемы
            .add_plugins((LifecyclePlugin, AIPlugin, NavigationPlugin, CombatPlugin))
            // Fixed timestep driver: один AgentTick на fixed step
            .add_systems(FixedUpdate, run_agent_tick);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
