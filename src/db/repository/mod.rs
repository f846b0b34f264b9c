//! Repository layer — entity-scoped database operations.
//!
//! All queries are parameterized; caller-supplied text never reaches a
//! statement except as a bound value.

mod appointment;
mod identity;
mod notification;

pub use appointment::*;
pub use identity::*;
pub use notification::*;
