//! Business logic services (use cases).
//!
//! Services orchestrate validation and repository calls. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod restaurant;
