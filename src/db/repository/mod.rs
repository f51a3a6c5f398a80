//! Repository layer — entity-scoped database operations.
//!
//! All public functions are re-exported here so callers can use
//! `crate::db::repository::*` without caring about the split.

mod clinic;
mod doctor;
mod specialty;
mod turn;

pub use clinic::*;
pub use doctor::*;
pub use specialty::*;
pub use turn::*;
