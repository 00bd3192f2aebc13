//! Active agent roster + read-only accessors for rendering/UI.

use bevy::prelude::*;

use crate::ai::AgentState;
use crate::combat::AgentDied;
use crate::components::{AgentHandle, Health};
use crate::lifecycle::SpawnTable;

/// Список активных (живых, активированных) агентов
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct AgentRoster {
    active: Vec<AgentHandle>,
}

impl AgentRoster {
    pub fn insert(&mut self, agent: AgentHandle) {
        if !self.active.contains(&agent) {
            self.active.push(agent);
        }
    }

    pub fn remove(&mut self, agent: AgentHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|handle| *handle != agent);
        self.active.len() != before
    }

    pub fn contains(&self, agent: AgentHandle) -> bool {
        self.active.contains(&agent)
    }

    pub fn handles(&self) -> &[AgentHandle] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Система: убрать умерших агентов из roster и spawn table (тот же тик)
pub fn release_dead_agents(
    mut death_events: EventReader<AgentDied>,
    mut roster: ResMut<AgentRoster>,
    mut spawn_table: ResMut<SpawnTable>,
) {
    for event in death_events.read() {
        roster.remove(event.agent);
        spawn_table.release(event.agent);
    }
}

pub fn agent_health(world: &World, agent: AgentHandle) -> Option<u32> {
    world.get::<Health>(agent.entity()).map(|health| health.current)
}

pub fn agent_state(world: &World, agent: AgentHandle) -> Option<AgentState> {
    world.get::<AgentState>(agent.entity()).copied()
}

/// Позиция агента (None если entity уже деспавнен)
pub fn agent_position(world: &World, agent: AgentHandle) -> Option<Vec3> {
    world.get::<Transform>(agent.entity()).map(|transform| transform.translation)
}
