//! Spawning: spawn table, deferred activation, spawn point validation.

use bevy::prelude::*;
use thiserror::Error;

use crate::ai::{AgentConfig, AgentState, PatrolTarget, PerceptionCache, SpawnAnchor};
use crate::combat::{Attacker, Dead};
use crate::components::{Agent, AgentHandle, Health};
use crate::lifecycle::AgentRoster;
use crate::navigation::{NavPath, NavigationService};

/// Одна точка спавна из конфигурации уровня
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSlot {
    pub position: Vec3,
    pub config: AgentConfig,
    /// Живой агент этого слота (None: ещё не спавнили или уже умер)
    pub instance: Option<AgentHandle>,
    /// Слот уже отработал (respawn нет)
    pub spawned: bool,
}

impl SpawnSlot {
    pub fn new(position: Vec3, config: AgentConfig) -> Self {
        Self {
            position,
            config,
            instance: None,
            spawned: false,
        }
    }
}

/// Таблица спавна агентов
///
/// Каждый слот спавнится ровно один раз, как только navigation zone готова.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnTable {
    pub slots: Vec<SpawnSlot>,
}

impl Default for SpawnTable {
    /// Стандартная раскладка уровня: три монстра по 100 HP
    fn default() -> Self {
        Self::empty()
            .with_slot(Vec3::new(0.0, 0.0, -1.0), AgentConfig::default())
            .with_slot(Vec3::new(10.0, 0.0, -15.0), AgentConfig::default())
            .with_slot(Vec3::new(-15.0, 0.0, -25.0), AgentConfig::default())
    }
}

impl SpawnTable {
    pub fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn with_slot(mut self, position: Vec3, config: AgentConfig) -> Self {
        self.slots.push(SpawnSlot::new(position, config));
        self
    }

    /// Агент умер: слот больше не ссылается на него
    pub fn release(&mut self, agent: AgentHandle) {
        for slot in self.slots.iter_mut() {
            if slot.instance == Some(agent) {
                slot.instance = None;
            }
        }
    }
}

/// Агент создан, но ещё не активирован (ждёт готовую навигацию)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PendingSpawn {
    /// Запрошенная позиция (до snapping)
    pub requested: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpawnError {
    #[error("no navigable point near spawn position {0}")]
    NoNavigablePoint(Vec3),
}

/// Создать агента
///
/// Handle возвращается сразу; активация (snapping на navmesh, AI компоненты)
/// происходит в `activate_pending_agents`, когда зона готова.
/// Health и AgentState доступны accessors с первого момента.
pub fn spawn_agent(commands: &mut Commands, position: Vec3, config: AgentConfig) -> AgentHandle {
    let health = Health::new(config.health.max(1));

    let entity = commands
        .spawn((
            Agent,
            health,
            AgentState::Patrol,
            config,
            Transform::from_translation(position),
            PendingSpawn { requested: position },
        ))
        .id();

    AgentHandle(entity)
}

/// Найти валидную точку спавна
///
/// - точка на navmesh → прижимаем к полу своего региона
/// - вне navmesh → ближайшая navigable точка любого региона
/// - ничего не нашли → SpawnError
pub fn validate_spawn_point(nav: &NavigationService, position: Vec3) -> Result<Vec3, SpawnError> {
    let region = nav.region_of(position);

    if region.is_none() {
        crate::logger::log_warning(&format!(
            "Spawn position {:.1?} is off the navmesh, snapping to nearest navigable point",
            position
        ));
    }

    nav.nearest_navigable_point(region, position)
        .ok_or(SpawnError::NoNavigablePoint(position))
}

/// Система: спавн слотов SpawnTable (каждый слот один раз)
pub fn spawn_configured_agents(mut commands: Commands, mut spawn_table: ResMut<SpawnTable>) {
    for slot in spawn_table.slots.iter_mut() {
        if slot.spawned {
            continue;
        }

        let handle = spawn_agent(&mut commands, slot.position, slot.config.clone());
        slot.instance = Some(handle);
        slot.spawned = true;

        crate::logger::log_info(&format!("Spawned agent {:?} at {:.1?}", handle.entity(), slot.position));
    }
}

/// Система: активация PendingSpawn агентов
///
/// Неудачный spawn не фатален: PendingSpawn остаётся, повтор в следующем тике.
pub fn activate_pending_agents(
    mut commands: Commands,
    pending: Query<(Entity, &PendingSpawn), (With<Agent>, Without<Dead>)>,
    nav: Res<NavigationService>,
    mut roster: ResMut<AgentRoster>,
) {
    for (entity, spawn) in pending.iter() {
        let position = match validate_spawn_point(&nav, spawn.requested) {
            Ok(position) => position,
            Err(error) => {
                crate::logger::log_warning(&format!("{:?}: spawn deferred: {}", entity, error));
                continue;
            }
        };

        commands.entity(entity).remove::<PendingSpawn>().insert((
            Transform::from_translation(position),
            SpawnAnchor(position),
            PatrolTarget::default(),
            NavPath::default(),
            PerceptionCache::default(),
            Attacker::default(),
        ));
        roster.insert(AgentHandle(entity));

        crate::logger::log(&format!("Activated agent {:?} at {:.1?}", entity, position));
    }
}
