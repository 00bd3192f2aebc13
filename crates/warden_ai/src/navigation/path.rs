//! Path planner/follower: состояние пути агента, политика replan, шаг движения.

use std::collections::VecDeque;

use bevy::prelude::*;
use thiserror::Error;

use super::query::NavigationService;

/// Waypoint ближе этого к target считается совпадающим (инвариант "путь заканчивается в target")
const PATH_END_EPSILON: f32 = 1e-3;

/// Путь агента (эксклюзивно принадлежит агенту)
///
/// Заменяется целиком при replan; частично меняется только pop головы при arrival.
#[derive(Component, Debug, Clone)]
pub struct NavPath {
    /// Оставшиеся waypoints, front(): ближайший непройденный
    pub waypoints: VecDeque<Vec3>,
    /// Куда ведёт текущий путь (snapped destination, == последний waypoint)
    pub target: Option<Vec3>,
    /// Какую цель просил planner (до snap на mesh); с ней сравнивает `should_replan`
    pub requested: Option<Vec3>,
    /// Время последнего пересчёта (успешного или нет)
    pub last_computed: f64,
    /// Сколько раз путь пересчитывался (телеметрия + тесты throttling)
    pub recompute_count: u32,
}

impl Default for NavPath {
    fn default() -> Self {
        Self {
            waypoints: VecDeque::new(),
            target: None,
            requested: None,
            last_computed: f64::NEG_INFINITY,
            recompute_count: 0,
        }
    }
}

impl NavPath {
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn next_waypoint(&self) -> Option<Vec3> {
        self.waypoints.front().copied()
    }

    /// Сбросить путь (cooldown timestamp сохраняется: throttling не обходится)
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.target = None;
        self.requested = None;
    }

    /// Заменить путь целиком (запрошенная цель совпадает с концом пути)
    pub fn assign(&mut self, waypoints: Vec<Vec3>, target: Vec3) {
        self.assign_towards(waypoints, target, target);
    }

    /// Заменить путь, построенный к `requested`, но закончившийся в snapped `target`
    pub fn assign_towards(&mut self, waypoints: Vec<Vec3>, target: Vec3, requested: Vec3) {
        self.waypoints = waypoints.into();
        if self.waypoints.back().is_none_or(|last| last.distance(target) > PATH_END_EPSILON) {
            self.waypoints.push_back(target);
        }
        self.target = Some(target);
        self.requested = Some(requested);
    }

    /// Отметить попытку пересчёта
    pub fn mark_recomputed(&mut self, now: f64) {
        self.last_computed = now;
        self.recompute_count += 1;
    }
}

/// Для какого состояния FSM планируем (разные пороги replan)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplanMode {
    /// Цель: patrol target (replan когда цель сменилась)
    Patrol,
    /// Цель: движущийся игрок (replan когда игрок ушёл дальше порога)
    Chase,
}

/// Параметры политики пересчёта
#[derive(Debug, Clone, Copy)]
pub struct ReplanPolicy {
    /// Минимальный интервал между пересчётами (секунды)
    pub cooldown: f64,
    /// Chase: насколько должна сместиться цель
    pub chase_threshold: f32,
    /// Patrol: допуск смены patrol target
    pub patrol_tolerance: f32,
}

/// Нужно ли пересчитать путь к `target`
///
/// 1. Cooldown соблюдается всегда (кроме самого первого пересчёта агента)
/// 2. Нет пути → пересчитываем
/// 3. Цель сместилась дальше порога режима → пересчитываем
///
/// Сравнение с запрошенной целью, не со snapped концом: игрок в заблокированной
/// зоне не должен вызывать replan на каждом cooldown.
pub fn should_replan(path: &NavPath, target: Vec3, mode: ReplanMode, policy: &ReplanPolicy, now: f64) -> bool {
    if now - path.last_computed < policy.cooldown {
        return false;
    }

    let Some(current_target) = path.requested.or(path.target) else {
        return true;
    };
    if path.is_empty() {
        return true;
    }

    let threshold = match mode {
        ReplanMode::Patrol => policy.patrol_tolerance,
        ReplanMode::Chase => policy.chase_threshold,
    };
    current_target.distance(target) > threshold
}

/// Почему путь не построен (не фатально: агент стоит до следующего replan)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlanError {
    #[error("agent at {0} is off the navmesh and cannot be snapped")]
    StartOffMesh(Vec3),
    #[error("target {0} has no navigable point in the agent's region")]
    TargetUnreachable(Vec3),
    #[error("no path from {from} to {to}")]
    NoPath { from: Vec3, to: Vec3 },
}

/// Построить путь от агента к цели
///
/// Старт и цель прижимаются к mesh; цель снапается внутрь региона агента.
/// Возвращает (waypoints, snapped target).
pub fn compute_path(nav: &NavigationService, from: Vec3, to: Vec3) -> Result<(Vec<Vec3>, Vec3), PlanError> {
    let (start, region) = match nav.region_of(from) {
        Some(region) => (from, region),
        None => {
            let snapped = nav
                .nearest_navigable_point(None, from)
                .ok_or(PlanError::StartOffMesh(from))?;
            let region = nav.region_of(snapped).ok_or(PlanError::StartOffMesh(from))?;
            (snapped, region)
        }
    };

    let end = if nav.region_of(to) == Some(region) {
        to
    } else {
        nav.nearest_navigable_point(Some(region), to)
            .ok_or(PlanError::TargetUnreachable(to))?
    };

    match nav.find_path(region, start, end) {
        Some(waypoints) if !waypoints.is_empty() => {
            let target = waypoints.last().copied().unwrap_or(end);
            Ok((waypoints, target))
        }
        _ => Err(PlanError::NoPath { from: start, to: end }),
    }
}

/// Результат одного шага следования по пути
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep {
    /// Нет waypoints: стоим
    Idle,
    /// Дошли до path[0]: waypoint снят, движения в этом тике нет
    Arrived { remaining: usize },
    /// Сдвинулись к path[0]
    Moved { direction: Vec3, distance: f32 },
}

/// Шаг к path[0] без overshoot
///
/// Если до waypoint меньше `arrival_tolerance`: pop и пропуск движения.
/// Пустой после pop путь сбрасывается целиком.
pub fn step_along_path(position: &mut Vec3, path: &mut NavPath, speed: f32, delta: f32, arrival_tolerance: f32) -> PathStep {
    let Some(waypoint) = path.next_waypoint() else {
        return PathStep::Idle;
    };

    let to_waypoint = waypoint - *position;
    let distance = to_waypoint.length();

    if distance < arrival_tolerance {
        path.waypoints.pop_front();
        if path.is_empty() {
            path.clear();
        }
        return PathStep::Arrived {
            remaining: path.waypoints.len(),
        };
    }

    let direction = to_waypoint / distance;
    let step = (speed * delta).min(distance);
    *position += direction * step;

    PathStep::Moved { direction, distance: step }
}
