//! Validated, immutable property bags.

use crate::error::{ValidationError, ValidationResult};
use crate::schema::{EntityType, PropertyDeclaration, PropertyKind, Schema};
use log::trace;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Value of a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// String value
    Scalar(String),
    /// Nested entity
    Entity(Properties),
    /// Nested entity list
    EntityList(Vec<Properties>),
}

impl PropertyValue {
    /// The string value of a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// The nested entity.
    pub fn as_entity(&self) -> Option<&Properties> {
        match self {
            Self::Entity(properties) => Some(properties),
            _ => None,
        }
    }

    /// The nested entity list.
    pub fn as_entity_list(&self) -> Option<&[Properties]> {
        match self {
            Self::EntityList(items) => Some(items),
            _ => None,
        }
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => Value::String(value.clone()),
            Self::Entity(properties) => properties.to_json(),
            Self::EntityList(items) => Value::Array(items.iter().map(Properties::to_json).collect()),
        }
    }
}

/// The validated property values of one entity instance.
///
/// Only [`Properties::construct`] creates a bag, and nothing mutates it
/// afterwards: there are no setters and the fields are private. Values are
/// kept in schema declaration order. Properties whose default resolved to
/// `null` are absent.
///
/// A bag remembers the schema it was validated against. Two bags are equal
/// only if they share that schema, not just its entity name.
#[derive(Clone)]
pub struct Properties {
    schema: &'static Schema,
    values: Vec<(String, PropertyValue)>,
}

impl Properties {
    /// Validate `values` against `schema` and build the property bag.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ArgumentError`] if `values` is not a JSON object
    /// - [`ValidationError::UnknownProperty`] for a key the schema does not declare
    /// - [`ValidationError::MissingRequiredProperties`] naming every required
    ///   property that was neither supplied nor defaulted
    /// - [`ValidationError::InvalidPropertyType`] for a value of the wrong shape,
    ///   including inside nested entities
    pub fn construct(schema: &'static Schema, values: Value) -> ValidationResult<Self> {
        let mut supplied = match values {
            Value::Object(map) => map,
            other => return Err(ValidationError::not_a_mapping(json_type_name(&other))),
        };

        if let Some(unknown) = supplied.keys().find(|key| !schema.contains(key)) {
            return Err(ValidationError::UnknownProperty {
                entity: schema.entity_name().to_string(),
                property: unknown.clone(),
            });
        }

        let missing = schema.resolve_missing(&supplied);
        if !missing.is_empty() {
            return Err(ValidationError::MissingRequiredProperties {
                entity: schema.entity_name().to_string(),
                missing,
            });
        }

        let mut values = Vec::with_capacity(schema.properties().len());
        for declaration in schema.properties() {
            let raw = match supplied.remove(declaration.name()) {
                Some(value) if !value.is_null() => value,
                _ => declaration
                    .default()
                    .map(|default| default.resolve())
                    .unwrap_or(Value::Null),
            };
            if raw.is_null() {
                continue;
            }
            let value = convert(declaration, raw)?;
            values.push((declaration.name().to_string(), value));
        }

        trace!(
            "Constructed {} with {} properties",
            schema.entity_name(),
            values.len()
        );
        Ok(Self { schema, values })
    }

    /// Name of the entity type these properties were validated for.
    pub fn entity_name(&self) -> &str {
        self.schema.entity_name()
    }

    /// The schema these properties were validated against.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Value of a property.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// String value of a scalar property.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_str)
    }

    /// A nested entity property.
    pub fn entity(&self, name: &str) -> Option<&Properties> {
        self.get(name).and_then(PropertyValue::as_entity)
    }

    /// A nested entity list property; empty when unset.
    pub fn entity_list(&self, name: &str) -> &[Properties] {
        self.get(name)
            .and_then(PropertyValue::as_entity_list)
            .unwrap_or_default()
    }

    /// Iterate properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of set properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check that these properties were validated against `schema` itself.
    ///
    /// A different schema declaring the same entity name does not match.
    pub fn check_entity(&self, schema: &Schema) -> ValidationResult<()> {
        if std::ptr::eq(self.schema, schema) {
            Ok(())
        } else {
            Err(ValidationError::EntityMismatch {
                expected: schema.entity_name().to_string(),
                actual: self.entity_name().to_string(),
            })
        }
    }

    /// Convert to a JSON object, nested entities included.
    ///
    /// The result can be fed back into [`Properties::construct`].
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl Eq for Properties {}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Properties")
            .field("entity_name", &self.entity_name())
            .field("values", &self.values)
            .finish()
    }
}

impl Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn convert(declaration: &PropertyDeclaration, raw: Value) -> ValidationResult<PropertyValue> {
    match declaration.kind() {
        PropertyKind::Scalar => match raw {
            Value::String(value) => Ok(PropertyValue::Scalar(value)),
            other => Err(ValidationError::invalid_type(
                declaration.name(),
                "string",
                json_type_name(&other),
            )),
        },
        PropertyKind::Entity(entity_type) => {
            construct_nested(declaration, entity_type, raw).map(PropertyValue::Entity)
        }
        PropertyKind::EntityList(entity_type) => match raw {
            Value::Array(items) => items
                .into_iter()
                .map(|item| construct_nested(declaration, entity_type, item))
                .collect::<ValidationResult<Vec<_>>>()
                .map(PropertyValue::EntityList),
            other => Err(ValidationError::invalid_type(
                declaration.name(),
                "array",
                json_type_name(&other),
            )),
        },
    }
}

fn construct_nested(
    declaration: &PropertyDeclaration,
    entity_type: &EntityType,
    raw: Value,
) -> ValidationResult<Properties> {
    if !raw.is_object() {
        return Err(ValidationError::invalid_type(
            declaration.name(),
            format!("{} object", entity_type.name()),
            json_type_name(&raw),
        ));
    }
    Properties::construct(entity_type.schema(), raw)
}

/// Get the type name of a JSON value for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
