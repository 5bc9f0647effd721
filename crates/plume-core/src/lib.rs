//! Plume Core - Foundational types for the Plume particle engine
//!
//! This crate provides the types that all other Plume crates depend on:
//! - `Vec3`, `Color` - Spatial and color value types
//! - `Control` - Parameter changes an input layer can request
//! - Error types and Result alias

mod control;
mod error;
mod types;

pub use control::Control;
pub use error::{PlumeError, Result};
pub use types::{Color, Vec3};
