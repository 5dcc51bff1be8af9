//! Incremental schema declaration.
//!
//! Entity types declare their properties once, usually inside a
//! `OnceLock` initializer, and keep the finished [`Schema`] for the life of the
//! program:
//!
//! ```rust
//! use xrd_entity::schema::{DefaultValue, Schema, SchemaBuilder};
//! use xrd_entity::SchemaResult;
//!
//! fn declare() -> SchemaResult<Schema> {
//!     let mut builder = SchemaBuilder::new("Contact");
//!     builder
//!         .declare_scalar("handle")?
//!         .declare_scalar_with_default("display_name", DefaultValue::from(""))?;
//!     Ok(builder.build())
//! }
//!
//! let schema = declare().unwrap();
//! assert_eq!(schema.property_names().collect::<Vec<_>>(), ["handle", "display_name"]);
//! ```

use crate::error::{SchemaError, SchemaResult};
use crate::schema::Schema;
use crate::schema::types::{DefaultValue, PropertyDeclaration, PropertyKind, TypeSpec};
use log::trace;

/// Builder collecting property declarations in call order.
///
/// A rejected declaration returns an error and leaves the builder unchanged.
#[derive(Debug)]
pub struct SchemaBuilder {
    entity_name: String,
    properties: Vec<PropertyDeclaration>,
}

impl SchemaBuilder {
    /// Start a schema for the named entity type.
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a required scalar property.
    pub fn declare_scalar(&mut self, name: &str) -> SchemaResult<&mut Self> {
        self.declare(name, PropertyKind::Scalar, None)
    }

    /// Declare a scalar property with a default.
    pub fn declare_scalar_with_default(
        &mut self,
        name: &str,
        default: DefaultValue,
    ) -> SchemaResult<&mut Self> {
        self.declare(name, PropertyKind::Scalar, Some(default))
    }

    /// Declare a required nested entity or entity list property.
    pub fn declare_entity(&mut self, name: &str, type_spec: TypeSpec) -> SchemaResult<&mut Self> {
        let kind = self.nested_kind(name, type_spec)?;
        self.declare(name, kind, None)
    }

    /// Declare a nested entity or entity list property with a default.
    pub fn declare_entity_with_default(
        &mut self,
        name: &str,
        type_spec: TypeSpec,
        default: DefaultValue,
    ) -> SchemaResult<&mut Self> {
        let kind = self.nested_kind(name, type_spec)?;
        self.declare(name, kind, Some(default))
    }

    /// Finish the schema.
    pub fn build(self) -> Schema {
        Schema::new(self.entity_name, self.properties)
    }

    fn nested_kind(&self, name: &str, type_spec: TypeSpec) -> SchemaResult<PropertyKind> {
        match type_spec {
            TypeSpec::One(entity_type) => Ok(PropertyKind::Entity(entity_type)),
            TypeSpec::List(types) => match types.as_slice() {
                [entity_type] => Ok(PropertyKind::EntityList(*entity_type)),
                _ => Err(SchemaError::InvalidType {
                    entity: self.entity_name.clone(),
                    property: name.to_string(),
                    details: format!(
                        "an entity list must name exactly one entity type, got {}",
                        types.len()
                    ),
                }),
            },
        }
    }

    fn declare(
        &mut self,
        name: &str,
        kind: PropertyKind,
        default: Option<DefaultValue>,
    ) -> SchemaResult<&mut Self> {
        if !is_identifier(name) {
            return Err(SchemaError::InvalidName {
                entity: self.entity_name.clone(),
                name: name.to_string(),
            });
        }
        if self.properties.iter().any(|property| property.name() == name) {
            return Err(SchemaError::DuplicateProperty {
                entity: self.entity_name.clone(),
                name: name.to_string(),
            });
        }

        trace!("Declaring property '{}' on {}: {:?}", name, self.entity_name, kind);
        self.properties
            .push(PropertyDeclaration::new(name.to_string(), kind, default));
        Ok(self)
    }
}

/// ASCII identifier: a letter or underscore, then letters, digits or underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
