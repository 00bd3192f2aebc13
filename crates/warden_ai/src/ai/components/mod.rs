//! AI components

pub mod fsm;
pub mod patrol;
pub mod perception;


// Re-export all components
pub use fsm::*;
pub use patrol::*;
pub use perception::*;
