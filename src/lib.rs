//! Declarative entity schemas and the XRD account discovery document.
//!
//! Entity types declare an ordered table of named properties once; a generic
//! constructor validates value mappings against that table and produces
//! immutable instances. The discovery document is built on the same layer and
//! adds an XML codec that also accepts the legacy document layout.
//!
//! # Core Components
//!
//! - [`Schema`] / [`SchemaBuilder`] - Property declarations per entity type
//! - [`Entity`] / [`Properties`] - Validated, immutable entity instances
//! - [`DiscoveryDocument`] - XRD discovery document with `to_xml` / `from_xml`
//!
//! # Quick Start
//!
//! ```rust
//! use xrd_entity::{DiscoveryDocument, EntityError};
//!
//! let result = DiscoveryDocument::from_xml("");
//! assert!(matches!(result, Err(EntityError::InvalidDocument { .. })));
//! ```

pub mod discovery;
pub mod entity;
pub mod error;
pub mod schema;

pub use discovery::{DiscoveryDocument, ParserConfig};
pub use entity::{Entity, Properties, PropertyValue};
pub use error::{
    EntityError, EntityResult, SchemaError, SchemaResult, ValidationError, ValidationResult,
};
pub use schema::{DefaultValue, EntityType, PropertyKind, Schema, SchemaBuilder, TypeSpec};
