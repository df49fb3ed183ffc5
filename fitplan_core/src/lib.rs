#![forbid(unsafe_code)]

//! Core domain model and plan-generation engine for fitplan.
//!
//! This crate provides:
//! - Domain types (profiles, splits, exercises, sessions, plans)
//! - The exercise catalog and muscle-group taxonomy
//! - Split selection, session scheduling and session composition
//! - Progressive overload
//! - The in-memory plan registry

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod split;
pub mod schedule;
pub mod progression;
pub mod composer;
pub mod engine;
pub mod registry;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, ExerciseQuery};
pub use config::Config;
pub use engine::{generate_plan, generate_plan_from, SESSION_COUNT};
pub use registry::{MemoryStore, PlanRegistry, PlanStore};
