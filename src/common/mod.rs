//! Common types, traits, and error definitions for prm_planner
//!
//! This module provides the foundational building blocks shared by
//! the geometry and path planning modules.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
