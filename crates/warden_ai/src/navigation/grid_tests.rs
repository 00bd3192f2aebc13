//! Tests for the grid navigation backend.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::grid::{GridNavigation, NavGrid};
    use super::super::query::{NavigationQuery, RegionId, ZoneId};

    /// 20×20 клеток по 1м, центр в (0,0,0), стена x ∈ [-10, 10] по z = 0 с проходом справа
    fn grid_with_wall() -> NavGrid {
        NavGrid::centered(10.0, 1.0).with_blocked_rect(Vec2::new(-10.0, -0.5), Vec2::new(6.0, 0.5))
    }

    /// Та же сетка, но стена разрезает её полностью (два региона)
    fn split_grid() -> NavGrid {
        NavGrid::centered(10.0, 1.0).with_blocked_rect(Vec2::new(-10.0, -0.5), Vec2::new(10.0, 0.5))
    }

    #[test]
    fn test_region_of_open_grid() {
        let grid = NavGrid::centered(10.0, 1.0);
        assert_eq!(grid.region_count(), 1);
        assert_eq!(grid.region_of(Vec3::new(3.0, 0.0, -4.0)), Some(RegionId(0)));
        assert_eq!(grid.region_of(Vec3::new(30.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_blocked_cell_has_no_region() {
        let grid = grid_with_wall();
        assert_eq!(grid.region_of(Vec3::new(0.0, 0.0, 0.0)), None);
        assert_eq!(grid.region_count(), 1);
    }

    #[test]
    fn test_full_wall_splits_regions() {
        let grid = split_grid();
        assert_eq!(grid.region_count(), 2);

        let north = grid.region_of(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        let south = grid.region_of(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_ne!(north, south);
        assert!(grid.find_path(north, Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_nearest_point_on_mesh_is_identity() {
        let grid = NavGrid::centered(10.0, 1.0);
        let point = Vec3::new(2.3, 0.0, -1.7);
        assert_eq!(grid.nearest_navigable_point(Some(RegionId(0)), point), Some(point));
    }

    #[test]
    fn test_nearest_point_snaps_outside_point_to_edge() {
        let grid = NavGrid::centered(10.0, 1.0);
        let snapped = grid.nearest_navigable_point(None, Vec3::new(15.0, 0.0, 0.2)).unwrap();

        assert!((snapped.x - 10.0).abs() < 0.01, "snapped = {:?}", snapped);
        assert!((snapped.z - 0.2).abs() < 1e-4);
        assert!(grid.region_of(snapped).is_some());
    }

    #[test]
    fn test_nearest_point_respects_region() {
        let grid = split_grid();
        let south = grid.region_of(Vec3::new(0.0, 0.0, 5.0)).unwrap();

        // Точка на севере, но просим регион юга → snap к южной кромке стены
        let snapped = grid.nearest_navigable_point(Some(south), Vec3::new(0.0, 0.0, -3.0)).unwrap();
        assert_eq!(grid.region_of(snapped), Some(south));
        assert!(snapped.z > 0.4);
    }

    #[test]
    fn test_path_same_cell_is_single_waypoint() {
        let grid = NavGrid::centered(10.0, 1.0);
        let end = Vec3::new(0.8, 0.0, 0.8);
        let path = grid.find_path(RegionId(0), Vec3::new(0.2, 0.0, 0.2), end).unwrap();
        assert_eq!(path, vec![end]);
    }

    #[test]
    fn test_path_goes_around_wall_and_ends_at_target() {
        let grid = grid_with_wall();
        let start = Vec3::new(-5.0, 0.0, -5.0);
        let end = Vec3::new(-5.0, 0.0, 5.0);

        let path = grid.find_path(RegionId(0), start, end).unwrap();

        assert_eq!(*path.last().unwrap(), end);
        // Проход только справа (x > 6), значит путь туда заходит
        assert!(path.iter().any(|p| p.x > 6.0), "path = {:?}", path);
        // И ни один waypoint не лежит в стене
        for waypoint in &path {
            assert!(grid.region_of(*waypoint).is_some(), "waypoint {:?} off mesh", waypoint);
        }
    }

    #[test]
    fn test_grid_navigation_zone_readiness() {
        let nav = GridNavigation::new().with_zone(ZoneId(1), NavGrid::centered(5.0, 1.0));

        assert!(nav.is_zone_ready(ZoneId(1)));
        assert!(!nav.is_zone_ready(ZoneId(2)));
        assert!(nav.region_of(ZoneId(2), Vec3::ZERO).is_none());
        assert!(nav.region_of(ZoneId(1), Vec3::ZERO).is_some());
    }
}
