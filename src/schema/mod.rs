//! Declarative entity schemas.
//!
//! This module provides the schema declaration layer: an ordered property
//! table per entity type, built once with [`SchemaBuilder`] and consulted by
//! the generic constructor in [`crate::entity`].
//!
//! # Key Types
//!
//! - [`Schema`] - Ordered property table with default and missing-property resolution
//! - [`SchemaBuilder`] - Incremental declaration of scalar and nested properties
//! - [`PropertyDeclaration`] - A single named property and its kind
//! - [`DefaultValue`] - Static or lazily computed property default

pub mod builder;
pub mod definition;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::SchemaBuilder;
pub use definition::Schema;
pub use types::{DefaultValue, EntityType, PropertyDeclaration, PropertyKind, TypeSpec};
