//! Combat systems (attacks, damage intake, death)

pub mod attack;
pub mod death;


// Re-export all systems
pub use attack::*;
pub use death::*;
