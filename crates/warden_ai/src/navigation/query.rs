//! Navigation Query Service interface.

use bevy::prelude::*;

use super::grid::GridNavigation;

/// Имя/handle navigation zone (один запечённый navmesh уровня)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZoneId(pub u32);

/// Связная компонента navmesh: две точки взаимно достижимы только в одном регионе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

/// Black-box navmesh query service
///
/// Все методы синхронные, bounded-cost и не мутируют mesh.
pub trait NavigationQuery: Send + Sync {
    /// Готова ли зона (navmesh загружен/запечён)
    fn is_zone_ready(&self, zone: ZoneId) -> bool;

    /// В каком регионе лежит точка (None: вне mesh)
    fn region_of(&self, zone: ZoneId, point: Vec3) -> Option<RegionId>;

    /// Ближайшая walkable точка
    ///
    /// `region = Some(r)`: только внутри региона r;
    /// `region = None`: среди всех регионов зоны (snapping спавна).
    fn nearest_navigable_point(&self, zone: ZoneId, region: Option<RegionId>, point: Vec3) -> Option<Vec3>;

    /// Кратчайший путь start → end внутри региона
    ///
    /// Waypoints упорядочены, первый: ближайший к start, последний == end.
    /// None (или пустой Vec): путь не найден.
    fn find_path(&self, zone: ZoneId, region: RegionId, start: Vec3, end: Vec3) -> Option<Vec<Vec3>>;
}

/// Resource: активный navmesh backend + зона уровня
#[derive(Resource)]
pub struct NavigationService {
    pub zone: ZoneId,
    backend: Box<dyn NavigationQuery>,
}

impl Default for NavigationService {
    /// Пустой grid backend без зон: `is_ready() == false`, спавн и тики отложены
    fn default() -> Self {
        Self::new(ZoneId::default(), GridNavigation::default())
    }
}

impl NavigationService {
    pub fn new(zone: ZoneId, backend: impl NavigationQuery + 'static) -> Self {
        Self {
            zone,
            backend: Box::new(backend),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_zone_ready(self.zone)
    }

    pub fn region_of(&self, point: Vec3) -> Option<RegionId> {
        self.backend.region_of(self.zone, point)
    }

    pub fn nearest_navigable_point(&self, region: Option<RegionId>, point: Vec3) -> Option<Vec3> {
        self.backend.nearest_navigable_point(self.zone, region, point)
    }

    pub fn find_path(&self, region: RegionId, start: Vec3, end: Vec3) -> Option<Vec<Vec3>> {
        self.backend.find_path(self.zone, region, start, end)
    }
}

/// Run condition: пока зона не готова, AgentTick ничего не спавнит и не тикает
pub fn navigation_ready(nav: Option<Res<NavigationService>>) -> bool {
    nav.is_some_and(|nav| nav.is_ready())
}
