//! Entity instances built from declared schemas.
//!
//! Every entity type owns a static [`Schema`] and wraps a validated
//! [`Properties`] bag. Construction happens exactly once, through
//! [`Entity::new`] or a document parser that ends up calling it, and the
//! result exposes read access only.
//!
//! ```rust
//! use std::sync::OnceLock;
//! use serde_json::json;
//! use xrd_entity::entity::{Entity, Properties};
//! use xrd_entity::schema::{Schema, SchemaBuilder};
//! use xrd_entity::ValidationResult;
//!
//! struct Contact(Properties);
//!
//! impl Entity for Contact {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: OnceLock<Schema> = OnceLock::new();
//!         SCHEMA.get_or_init(|| {
//!             let mut builder = SchemaBuilder::new("Contact");
//!             builder.declare_scalar("handle").expect("valid declaration");
//!             builder.build()
//!         })
//!     }
//!
//!     fn from_properties(properties: Properties) -> ValidationResult<Self> {
//!         properties.check_entity(Self::schema())?;
//!         Ok(Self(properties))
//!     }
//!
//!     fn properties(&self) -> &Properties {
//!         &self.0
//!     }
//! }
//!
//! let contact = Contact::new(json!({"handle": "alice@example.org"})).unwrap();
//! assert_eq!(contact.properties().scalar("handle"), Some("alice@example.org"));
//! assert!(Contact::new(json!({})).is_err());
//! ```

mod properties;


pub use properties::{Properties, PropertyValue};

use crate::error::{EntityResult, ValidationResult};
use crate::schema::Schema;
use serde_json::Value;

/// Capability shared by all declared entity types.
///
/// Implementing this trait is what allows a type to be referenced from
/// another schema through [`EntityType::of`](crate::schema::EntityType::of).
pub trait Entity: Sized {
    /// The type's schema, built once and shared by all instances.
    fn schema() -> &'static Schema;

    /// Wrap properties already validated against [`Entity::schema`].
    ///
    /// Implementations should reject bags built for another schema with
    /// [`Properties::check_entity`].
    fn from_properties(properties: Properties) -> ValidationResult<Self>;

    /// The validated properties.
    fn properties(&self) -> &Properties;

    /// Construct an instance from a JSON object of property values.
    fn new(values: Value) -> EntityResult<Self> {
        let properties = Properties::construct(Self::schema(), values)?;
        Ok(Self::from_properties(properties)?)
    }

    /// JSON object of the instance's properties.
    fn to_json(&self) -> Value {
        self.properties().to_json()
    }
}
