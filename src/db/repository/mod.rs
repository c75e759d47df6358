//! Repository layer — entity-scoped database operations.
//!
//! Plain functions over `&Connection`: this layer owns SQL and row
//! mapping, the directory layer above owns business rules and the
//! not-found taxonomy.

mod appointments;
mod doctors;
mod patients;

pub use appointments::*;
pub use doctors::*;
pub use patients::*;
