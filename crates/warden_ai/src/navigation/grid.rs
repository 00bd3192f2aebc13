//! Grid navmesh backend
//!
//! Uniform сетка walkable клеток на плоскости XZ (y = origin.y).
//! Регионы = связные компоненты (flood fill, 8-соседей без срезания углов).
//! Путь = A* по центрам клеток, последний waypoint всегда == end.
//!
//! Это reference backend для тестов и headless демо; в игре на его место
//! встаёт запечённый navmesh движка через тот же `NavigationQuery`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use bevy::prelude::*;

use super::query::{NavigationQuery, RegionId, ZoneId};

/// 8 направлений (dx, dz)
const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Одна navigation zone: сетка клеток + регионы
#[derive(Debug, Clone)]
pub struct NavGrid {
    /// Минимальный угол сетки (x, y, z); y: высота пола
    origin: Vec3,
    cell_size: f32,
    width: u32,
    depth: u32,
    walkable: Vec<bool>,
    regions: Vec<Option<u32>>,
}

impl NavGrid {
    /// Полностью проходимая сетка `width × depth` клеток
    pub fn open(width: u32, depth: u32, cell_size: f32, origin: Vec3) -> Self {
        let count = (width * depth) as usize;
        let mut grid = Self {
            origin,
            cell_size: cell_size.max(0.01),
            width,
            depth,
            walkable: vec![true; count],
            regions: vec![None; count],
        };
        grid.rebuild_regions();
        grid
    }

    /// Квадратная сетка с центром в (0, 0, 0)
    pub fn centered(half_extent: f32, cell_size: f32) -> Self {
        let cells = ((half_extent * 2.0) / cell_size).ceil().max(1.0) as u32;
        Self::open(cells, cells, cell_size, Vec3::new(-half_extent, 0.0, -half_extent))
    }

    /// Заблокировать все клетки, центр которых лежит в прямоугольнике [min, max] (XZ)
    pub fn with_blocked_rect(mut self, min: Vec2, max: Vec2) -> Self {
        for z in 0..self.depth {
            for x in 0..self.width {
                let center = self.cell_center(x, z);
                if center.x >= min.x && center.x <= max.x && center.z >= min.y && center.z <= max.y {
                    let index = self.index(x, z);
                    self.walkable[index] = false;
                }
            }
        }
        self.rebuild_regions();
        self
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Количество связных регионов
    pub fn region_count(&self) -> u32 {
        self.regions.iter().flatten().max().map_or(0, |max| max + 1)
    }

    fn index(&self, x: u32, z: u32) -> usize {
        (z * self.width + x) as usize
    }

    fn cell_of(&self, point: Vec3) -> Option<(u32, u32)> {
        let local = (point - self.origin) / self.cell_size;
        if local.x < 0.0 || local.z < 0.0 {
            return None;
        }
        let (x, z) = (local.x.floor() as u32, local.z.floor() as u32);
        (x < self.width && z < self.depth).then_some((x, z))
    }

    fn cell_center(&self, x: u32, z: u32) -> Vec3 {
        Vec3::new(
            self.origin.x + (x as f32 + 0.5) * self.cell_size,
            self.origin.y,
            self.origin.z + (z as f32 + 0.5) * self.cell_size,
        )
    }

    fn region_at(&self, x: u32, z: u32) -> Option<u32> {
        self.regions[self.index(x, z)]
    }

    /// Проходимые соседи клетки (диагональ только если оба ортогональных соседа свободны)
    fn neighbors(&self, x: u32, z: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        NEIGHBORS.iter().filter_map(move |&(dx, dz)| {
            let nx = x as i32 + dx;
            let nz = z as i32 + dz;
            if !self.is_walkable(nx, nz) {
                return None;
            }
            if dx != 0 && dz != 0 && !(self.is_walkable(x as i32 + dx, z as i32) && self.is_walkable(x as i32, z as i32 + dz)) {
                return None;
            }
            Some((nx as u32, nz as u32))
        })
    }

    fn is_walkable(&self, x: i32, z: i32) -> bool {
        x >= 0
            && z >= 0
            && (x as u32) < self.width
            && (z as u32) < self.depth
            && self.walkable[self.index(x as u32, z as u32)]
    }

    /// Flood fill: пересчитать регионы после изменения walkable
    fn rebuild_regions(&mut self) {
        self.regions.iter_mut().for_each(|region| *region = None);

        let mut next_region = 0;
        let mut queue = VecDeque::new();

        for z in 0..self.depth {
            for x in 0..self.width {
                let index = self.index(x, z);
                if !self.walkable[index] || self.regions[index].is_some() {
                    continue;
                }

                self.regions[index] = Some(next_region);
                queue.push_back((x, z));

                while let Some((cx, cz)) = queue.pop_front() {
                    let neighbors: Vec<_> = self.neighbors(cx, cz).collect();
                    for (nx, nz) in neighbors {
                        let n_index = self.index(nx, nz);
                        if self.regions[n_index].is_none() {
                            self.regions[n_index] = Some(next_region);
                            queue.push_back((nx, nz));
                        }
                    }
                }

                next_region += 1;
            }
        }
    }

    pub fn region_of(&self, point: Vec3) -> Option<RegionId> {
        let (x, z) = self.cell_of(point)?;
        self.region_at(x, z).map(RegionId)
    }

    pub fn nearest_navigable_point(&self, region: Option<RegionId>, point: Vec3) -> Option<Vec3> {
        let matches = |cell_region: Option<u32>| match (cell_region, region) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(cell), Some(RegionId(wanted))) => cell == wanted,
        };

        // Точка уже на mesh в нужном регионе: только прижимаем к полу
        if let Some((x, z)) = self.cell_of(point) {
            if matches(self.region_at(x, z)) {
                return Some(Vec3::new(point.x, self.origin.y, point.z));
            }
        }

        // Небольшой inset, чтобы snapped точка не попала на границу соседней клетки
        let inset = self.cell_size * 1e-3;
        let half = self.cell_size * 0.5 - inset;

        let mut best: Option<(f32, Vec3)> = None;
        for z in 0..self.depth {
            for x in 0..self.width {
                if !matches(self.region_at(x, z)) {
                    continue;
                }
                let center = self.cell_center(x, z);
                let candidate = Vec3::new(
                    point.x.clamp(center.x - half, center.x + half),
                    self.origin.y,
                    point.z.clamp(center.z - half, center.z + half),
                );
                let distance = candidate.distance_squared(Vec3::new(point.x, self.origin.y, point.z));
                if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                    best = Some((distance, candidate));
                }
            }
        }

        best.map(|(_, candidate)| candidate)
    }

    pub fn find_path(&self, region: RegionId, start: Vec3, end: Vec3) -> Option<Vec<Vec3>> {
        let start_cell = self.cell_of(start)?;
        let end_cell = self.cell_of(end)?;

        if self.region_at(start_cell.0, start_cell.1) != Some(region.0)
            || self.region_at(end_cell.0, end_cell.1) != Some(region.0)
        {
            return None;
        }

        let end_point = Vec3::new(end.x, self.origin.y, end.z);
        if start_cell == end_cell {
            return Some(vec![end_point]);
        }

        let cells = self.astar(start_cell, end_cell)?;

        // Центры промежуточных клеток (без стартовой и конечной) + точный end
        let mut waypoints: Vec<Vec3> = cells[1..cells.len() - 1]
            .iter()
            .map(|&(x, z)| self.cell_center(x, z))
            .collect();
        waypoints.push(end_point);
        Some(waypoints)
    }

    /// A* по клеткам, возвращает цепочку клеток start..=goal
    fn astar(&self, start: (u32, u32), goal: (u32, u32)) -> Option<Vec<(u32, u32)>> {
        #[derive(Clone, Copy)]
        struct Node {
            index: usize,
            f_score: f32,
        }

        impl PartialEq for Node {
            fn eq(&self, other: &Self) -> bool {
                self.index == other.index
            }
        }

        impl Eq for Node {}

        impl PartialOrd for Node {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for Node {
            // Min-heap по f_score
            fn cmp(&self, other: &Self) -> Ordering {
                other.f_score.partial_cmp(&self.f_score).unwrap_or(Ordering::Equal)
            }
        }

        let count = self.walkable.len();
        let mut g_score = vec![f32::INFINITY; count];
        let mut came_from: Vec<Option<usize>> = vec![None; count];
        let mut closed = vec![false; count];
        let mut open_set = BinaryHeap::new();

        let goal_center = self.cell_center(goal.0, goal.1);
        let start_index = self.index(start.0, start.1);
        let goal_index = self.index(goal.0, goal.1);

        g_score[start_index] = 0.0;
        open_set.push(Node {
            index: start_index,
            f_score: self.cell_center(start.0, start.1).distance(goal_center),
        });

        while let Some(current) = open_set.pop() {
            if current.index == goal_index {
                let mut chain = vec![goal];
                let mut cursor = goal_index;
                while let Some(previous) = came_from[cursor] {
                    chain.push(self.cell_coords(previous));
                    cursor = previous;
                }
                chain.reverse();
                return Some(chain);
            }

            if closed[current.index] {
                continue;
            }
            closed[current.index] = true;

            let (cx, cz) = self.cell_coords(current.index);
            let current_center = self.cell_center(cx, cz);

            for (nx, nz) in self.neighbors(cx, cz) {
                let n_index = self.index(nx, nz);
                if closed[n_index] {
                    continue;
                }

                let n_center = self.cell_center(nx, nz);
                let tentative = g_score[current.index] + current_center.distance(n_center);
                if tentative < g_score[n_index] {
                    g_score[n_index] = tentative;
                    came_from[n_index] = Some(current.index);
                    open_set.push(Node {
                        index: n_index,
                        f_score: tentative + n_center.distance(goal_center),
                    });
                }
            }
        }

        None
    }

    fn cell_coords(&self, index: usize) -> (u32, u32) {
        (index as u32 % self.width, index as u32 / self.width)
    }
}

/// `NavigationQuery` поверх набора grid-зон
#[derive(Debug, Clone, Default)]
pub struct GridNavigation {
    zones: HashMap<ZoneId, NavGrid>,
}

impl GridNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: ZoneId, grid: NavGrid) -> Self {
        self.zones.insert(zone, grid);
        self
    }

    pub fn zone(&self, zone: ZoneId) -> Option<&NavGrid> {
        self.zones.get(&zone)
    }
}

impl NavigationQuery for GridNavigation {
    fn is_zone_ready(&self, zone: ZoneId) -> bool {
        self.zones.contains_key(&zone)
    }

    fn region_of(&self, zone: ZoneId, point: Vec3) -> Option<RegionId> {
        self.zones.get(&zone)?.region_of(point)
    }

    fn nearest_navigable_point(&self, zone: ZoneId, region: Option<RegionId>, point: Vec3) -> Option<Vec3> {
        self.zones.get(&zone)?.nearest_navigable_point(region, point)
    }

    fn find_path(&self, zone: ZoneId, region: RegionId, start: Vec3, end: Vec3) -> Option<Vec<Vec3>> {
        self.zones.get(&zone)?.find_path(region, start, end)
    }
}
