//! Simulation clock + AgentTick schedule
//!
//! Агенты тикают в отдельном schedule (`AgentTick`), а не прямо в FixedUpdate:
//! - тесты и хост зовут `tick(world, delta)` с явным delta (детерминизм)
//! - FixedUpdate driver (`run_agent_tick`) делает то же самое с fixed timestep
//!
//! Все throttling timestamps (perception cache, path cooldown, attack cooldown)
//! считаются от `SimClock::elapsed`, а не от wall-clock.

use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

use crate::combat::{AgentDied, DamageAgent, PlayerDamaged};

/// Schedule одного шага симуляции агентов
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentTick;

/// Порядок фаз внутри `AgentTick`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentTickSet {
    /// Спавн/активация агентов
    Lifecycle,
    /// Обновление perception cache
    Perception,
    /// FSM transitions + patrol sampling
    Decision,
    /// Path planner + follower
    Navigation,
    /// Атаки и входящий урон
    Combat,
    /// Уборка трупов
    Cleanup,
}

/// Время симуляции агентов (секунды)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    /// Сколько прошло с начала симуляции
    pub elapsed: f64,
    /// Delta текущего тика
    pub delta: f32,
    /// Номер тика (0 до первого вызова `tick`)
    pub tick: u64,
}

impl SimClock {
    pub fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.delta = delta;
        self.elapsed += delta as f64;
        self.tick += 1;
    }

    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

/// Продвинуть всех активных агентов на один шаг
///
/// Ротирует буферы событий агентов (вне `app.update()` этого никто не делает),
/// flush'ит отложенные команды (например `spawn_agent` через `world.commands()`),
/// двигает часы и прогоняет `AgentTick`. Если schedule не зарегистрирован
/// (плагин не добавлен): только логируем.
///
/// Событие живёт два тика: отправленное до тика N читается системами в тике N,
/// записанное в тике N видно хосту после тиков N и N+1.
pub fn tick(world: &mut World, delta: f32) {
    update_agent_events(world);
    step(world, delta);
}

/// FixedUpdate driver: один `AgentTick` на каждый fixed step
///
/// Буферы событий здесь не трогаем: под `app.update()` их ротирует
/// `event_update_system` в `First`, повторная ротация теряла бы события хоста.
pub fn run_agent_tick(world: &mut World) {
    let Some(delta) = world.get_resource::<Time<Fixed>>().map(|time| time.delta_secs()) else {
        return;
    };
    step(world, delta);
}

fn step(world: &mut World, delta: f32) {
    world.flush();
    world.get_resource_or_insert_with(SimClock::default).advance(delta);

    if world.try_run_schedule(AgentTick).is_err() {
        crate::logger::log_error("tick: AgentTick schedule missing (AgentSimulationPlugin not added?)");
    }
}

/// Double-buffer swap для событий agent core (старший буфер выбрасывается)
fn update_agent_events(world: &mut World) {
    rotate_events::<DamageAgent>(world);
    rotate_events::<PlayerDamaged>(world);
    rotate_events::<AgentDied>(world);
}

fn rotate_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advance() {
        let mut clock = SimClock::default();
        clock.advance(0.5);
        clock.advance(0.25);

        assert_eq!(clock.tick, 2);
        assert_eq!(clock.delta, 0.25);
        assert!((clock.now() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_clock_ignores_negative_delta() {
        let mut clock = SimClock::default();
        clock.advance(-1.0);

        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.tick, 1);
    }

    #[test]
    fn test_tick_drops_events_after_two_ticks() {
        let mut world = World::new();
        world.add_schedule(Schedule::new(AgentTick));
        world.init_resource::<Events<DamageAgent>>();
        world.init_resource::<Events<PlayerDamaged>>();
        world.init_resource::<Events<AgentDied>>();

        let target = crate::components::AgentHandle(Entity::PLACEHOLDER);
        for _ in 0..100 {
            world.send_event(DamageAgent { target, amount: 1 });
            tick(&mut world, 1.0 / 60.0);
        }

        // Остаётся только отправленное перед последним тиком
        assert_eq!(world.resource::<Events<DamageAgent>>().len(), 1);
        assert_eq!(world.resource::<SimClock>().tick, 100);
    }
}
