//! AI systems (perception, FSM, patrol sampling)

pub mod fsm;
pub mod patrol;
pub mod perception;


// Re-export all systems
pub use fsm::*;
pub use patrol::*;
pub use perception::*;
