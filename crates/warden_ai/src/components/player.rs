//! Player collaborator marker
//!
//! Agent core только читает Transform игрока (position query)
//! и пишет `PlayerDamaged` события. Движение/коллизии игрока: не наша зона.

use bevy::prelude::Component;

/// Marker component для player entity
///
/// Perception берёт первый entity с этим маркером.
/// Игрок не должен одновременно быть агентом (`Without<Agent>` фильтры).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
