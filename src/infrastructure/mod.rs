//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer, providing concrete
//! implementations for data persistence.

pub mod persistence;
