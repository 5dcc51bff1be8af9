//! Property declaration types for entity schemas.
//!
//! A schema is an ordered list of [`PropertyDeclaration`]s. Each declaration is
//! either a scalar string property or a reference to another entity type, held
//! singly or as a list. Nested references go through [`EntityType`], which can
//! only be built for types implementing [`Entity`], so an invalid nesting is a
//! compile error rather than a runtime probe.

use crate::entity::Entity;
use crate::schema::Schema;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Handle to a declared entity type, used by nested properties.
///
/// The schema is reached through a function pointer and only resolved when a
/// nested value is constructed, so a type may reference itself.
#[derive(Clone, Copy)]
pub struct EntityType {
    type_name: &'static str,
    schema: fn() -> &'static Schema,
}

impl EntityType {
    /// Capture the schema of an entity type.
    pub fn of<T: Entity>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            schema: T::schema,
        }
    }

    /// Short Rust type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }

    /// Schema of the referenced type.
    pub fn schema(&self) -> &'static Schema {
        (self.schema)()
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityType").field(&self.name()).finish()
    }
}

/// Type argument of a nested-entity declaration.
///
/// Mirrors the two accepted forms: a single entity type, or a list naming
/// exactly one entity type. A list with any other length is rejected when the
/// property is declared.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    /// A single nested entity
    One(EntityType),
    /// A list of nested entities of one type
    List(Vec<EntityType>),
}

impl TypeSpec {
    /// Single nested entity of type `T`.
    pub fn one<T: Entity>() -> Self {
        Self::One(EntityType::of::<T>())
    }

    /// List of nested entities of type `T`.
    pub fn list_of<T: Entity>() -> Self {
        Self::List(vec![EntityType::of::<T>()])
    }
}

/// Kind of a declared property.
#[derive(Debug, Clone, Copy)]
pub enum PropertyKind {
    /// String value
    Scalar,
    /// Single nested entity
    Entity(EntityType),
    /// Repeated nested entity
    EntityList(EntityType),
}

impl PropertyKind {
    /// Whether values of this kind are nested entities.
    pub fn is_nested(&self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// The nested entity type, if any.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            Self::Scalar => None,
            Self::Entity(entity_type) | Self::EntityList(entity_type) => Some(*entity_type),
        }
    }
}

/// Default for a property that may be omitted at construction.
///
/// `Static` values are cloned for every instance. `Lazy` producers run again
/// for every instance, so defaults like timestamps are never shared.
/// A default that resolves to JSON `null` leaves the property unset.
#[derive(Clone)]
pub enum DefaultValue {
    /// Fixed value
    Static(Value),
    /// Producer invoked on each construction
    Lazy(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    /// Wrap a zero-argument producer.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(producer))
    }

    /// Resolve the default to a concrete value.
    pub fn resolve(&self) -> Value {
        match self {
            Self::Static(value) => value.clone(),
            Self::Lazy(producer) => producer(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Static(Value::String(value.to_string()))
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Static(value)
    }
}

/// A single named property in a schema.
#[derive(Debug, Clone)]
pub struct PropertyDeclaration {
    name: String,
    kind: PropertyKind,
    default: Option<DefaultValue>,
}

impl PropertyDeclaration {
    pub(crate) fn new(name: String, kind: PropertyKind, default: Option<DefaultValue>) -> Self {
        Self {
            name,
            kind,
            default,
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property kind
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Declared default, if any
    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Whether the property must be supplied at construction
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}
