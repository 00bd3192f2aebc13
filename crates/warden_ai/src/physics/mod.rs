//! Static world geometry для ray tests (line of sight)
//!
//! Геометрия неизменна во время геймплея: агенты её только читают
//! и хранят `ColliderHandle`, а не ссылки.

pub mod colliders;


pub use colliders::{ColliderHandle, ColliderShape, RayHit, StaticColliders};
