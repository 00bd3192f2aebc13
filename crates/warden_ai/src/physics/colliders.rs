//! Arena статических коллайдеров + first-hit raycast.

use bevy::math::bounding::{Aabb3d, BoundingSphere, RayCast3d};
use bevy::prelude::*;

/// Индекс коллайдера в `StaticColliders`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub u32);

/// Форма статического коллайдера (закрытый набор вариантов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box (стены, ящики, колонны)
    Cuboid { center: Vec3, half_extents: Vec3 },
    /// Сфера (валуны, бочки)
    Sphere { center: Vec3, radius: f32 },
}

impl ColliderShape {
    /// Дистанция вдоль луча до входа в форму (если < max)
    fn ray_distance(&self, ray: &RayCast3d) -> Option<f32> {
        match *self {
            ColliderShape::Cuboid { center, half_extents } => {
                ray.aabb_intersection_at(&Aabb3d::new(center, half_extents))
            }
            ColliderShape::Sphere { center, radius } => {
                ray.sphere_intersection_at(&BoundingSphere::new(center, radius))
            }
        }
    }

    /// Нормаль поверхности в точке попадания
    fn normal_at(&self, point: Vec3) -> Vec3 {
        match *self {
            ColliderShape::Cuboid { center, half_extents } => {
                // Ось с наибольшим относительным смещением = грань попадания
                let local = (point - center) / half_extents.max(Vec3::splat(1e-6));
                let abs = local.abs();
                if abs.x >= abs.y && abs.x >= abs.z {
                    Vec3::X * local.x.signum()
                } else if abs.y >= abs.z {
                    Vec3::Y * local.y.signum()
                } else {
                    Vec3::Z * local.z.signum()
                }
            }
            ColliderShape::Sphere { center, .. } => (point - center).normalize_or_zero(),
        }
    }
}

/// Результат raycast: ближайшее попадание
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderHandle,
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Статическая геометрия мира (read-only во время геймплея)
#[derive(Resource, Debug, Clone, Default)]
pub struct StaticColliders {
    shapes: Vec<ColliderShape>,
}

impl StaticColliders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить коллайдер (только на этапе загрузки уровня)
    pub fn insert(&mut self, shape: ColliderShape) -> ColliderHandle {
        let handle = ColliderHandle(self.shapes.len() as u32);
        self.shapes.push(shape);
        handle
    }

    pub fn with(mut self, shape: ColliderShape) -> Self {
        self.insert(shape);
        self
    }

    pub fn get(&self, handle: ColliderHandle) -> Option<&ColliderShape> {
        self.shapes.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Первое попадание луча в пределах `max_distance`
    ///
    /// `direction` должен быть ненулевым; иначе `None`.
    pub fn first_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let Ok(direction) = Dir3::new(direction) else {
            return None;
        };

        let ray = RayCast3d::from_ray(Ray3d::new(origin, direction), max_distance);

        let mut best: Option<RayHit> = None;
        for (index, shape) in self.shapes.iter().enumerate() {
            let Some(distance) = shape.ray_distance(&ray) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if best.is_some_and(|hit| hit.distance <= distance) {
                continue;
            }

            let point = origin + *direction * distance;
            best = Some(RayHit {
                collider: ColliderHandle(index as u32),
                distance,
                point,
                normal: shape.normal_at(point),
            });
        }

        best
    }
}
