//! The per-type property table.

use crate::schema::types::PropertyDeclaration;
use serde_json::{Map, Value};

/// Ordered property declarations of one entity type.
///
/// Built once through [`SchemaBuilder`](crate::schema::SchemaBuilder) and
/// shared read-only by every instance of the type. Declaration order is the
/// order used for construction and serialization.
#[derive(Debug, Clone)]
pub struct Schema {
    entity_name: String,
    properties: Vec<PropertyDeclaration>,
}

impl Schema {
    pub(crate) fn new(entity_name: String, properties: Vec<PropertyDeclaration>) -> Self {
        Self {
            entity_name,
            properties,
        }
    }

    /// Name of the entity type this schema describes.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// All declarations in declaration order.
    pub fn properties(&self) -> &[PropertyDeclaration] {
        &self.properties
    }

    /// Look up a declaration by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|property| property.name() == name)
    }

    /// Whether the schema declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(PropertyDeclaration::name)
    }

    /// Declarations without a default.
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.properties.iter().filter(|property| property.is_required())
    }

    /// Declarations whose values are nested entities or entity lists.
    pub fn nested_properties(&self) -> Vec<&PropertyDeclaration> {
        self.properties
            .iter()
            .filter(|property| property.kind().is_nested())
            .collect()
    }

    /// Resolve every declared default.
    ///
    /// Lazy producers run on every call, so each caller gets freshly computed
    /// values. Defaults resolving to `null` are left out.
    pub fn compute_defaults(&self) -> Map<String, Value> {
        self.properties
            .iter()
            .filter_map(|property| {
                let value = property.default()?.resolve();
                (!value.is_null()).then(|| (property.name().to_string(), value))
            })
            .collect()
    }

    /// Names of required properties that `candidate` does not supply.
    ///
    /// A property counts as supplied when its key is present with a non-null
    /// value. Names are returned in declaration order.
    pub fn resolve_missing(&self, candidate: &Map<String, Value>) -> Vec<String> {
        self.required_properties()
            .filter(|property| {
                candidate
                    .get(property.name())
                    .is_none_or(|value| value.is_null())
            })
            .map(|property| property.name().to_string())
            .collect()
    }
}
