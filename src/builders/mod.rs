//! # Builders
//!
//! Fluent construction of key material.
//!
//! ## Modules
//!
//! - [`key_builder`] - Builder for [`KeyMaterial`](crate::KeyMaterial) with sensible defaults

pub mod key_builder;

pub use key_builder::KeyMaterialBuilder;
