//! ECS компоненты общие для всех доменов
//!
//! - agent: маркер агента + handle для внешних коллабораторов
//! - actor: Health (инвариант health == 0 ⇔ Dead)
//! - player: маркер игрока (position query для perception)

pub mod agent;
pub mod actor;
pub mod player;

pub use agent::*;
pub use actor::*;
pub use player::*;
