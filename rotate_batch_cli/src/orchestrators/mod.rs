//! Command orchestrators for business logic
//!
//! This module provides orchestrators that coordinate between the CLI layer
//! and the core library services.

pub mod rotate_orchestrator;

pub use rotate_orchestrator::RotateOrchestrator;
