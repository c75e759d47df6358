//! Domain models: entities, write payloads and search filters.

pub mod enums;

mod appointment;
mod doctor;
mod filters;
mod patient;

pub use appointment::*;
pub use doctor::*;
pub use enums::*;
pub use filters::*;
pub use patient::*;
