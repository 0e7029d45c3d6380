//! Domain layer — pure types, geometry, and manifest construction.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod digest;
pub mod encode;
pub mod error;
pub mod layout;
pub mod manifest;

pub use config::{ConfigOverrides, GeneratorConfig};
pub use digest::DigestAlgorithm;
pub use error::GeneratorError;
pub use layout::{BootRegions, Region};
