//! Todo tracking.
//!
//! Todos are created from raw user input, listed with filters and an
//! allow-listed ordering, scheduled for the current day from their planned
//! working window, and updated or deleted by key. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
