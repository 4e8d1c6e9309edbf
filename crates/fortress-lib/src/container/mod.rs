//! # Container Module
//!
//! Turns a component manifest into a verified lifecycle plan.
//!
//! ## Modules
//!
//! - [`manifest`] - TOML component declarations
//! - [`plan`] - Startup/shutdown sequencing on top of [`crate::dag`]

pub mod manifest;
pub mod plan;

pub use manifest::{ComponentManifest, ComponentSpec, ManifestError};
pub use plan::{ComponentEntry, ContainerError, LifecyclePlan, PlannedComponent};
