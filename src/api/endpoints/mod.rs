//! API endpoint handlers, one module per resource.
//!
//! Handlers stay thin: decode the request, call the matching directory
//! component, let `ApiError` pick the status.

pub mod appointments;
pub mod doctors;
pub mod health;
pub mod patients;
