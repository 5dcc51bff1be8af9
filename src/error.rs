//! Error types for entity schemas, entity construction and document parsing.
//!
//! Errors are split by the layer that raises them: [`SchemaError`] for mistakes
//! in a type's property declarations, [`ValidationError`] for values that do not
//! fit a schema, and [`EntityError`] as the umbrella type returned by the public
//! entry points, which also carries the document-level parse failures.

/// Main error type for entity construction and document parsing.
///
/// Callers building documents from local data usually only see
/// [`EntityError::Validation`], which signals programmatic misuse. The
/// [`EntityError::InvalidDocument`] and [`EntityError::InvalidData`] variants
/// mean a remotely retrieved document is unusable.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// A schema declaration was rejected
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Supplied values do not conform to the entity schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input text is not well-formed XML (including empty input)
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// Input is well-formed XML but lacks the content needed to build an entity
    #[error("Invalid data: {message}")]
    InvalidData { message: String },
}

/// Errors raised while declaring the properties of an entity type.
///
/// These are programming errors in a schema definition and never occur while
/// constructing instances.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Property name is not a valid identifier
    #[error("Invalid property name '{name}' in entity '{entity}'")]
    InvalidName { entity: String, name: String },

    /// Nested property does not reference exactly one entity type
    #[error("Invalid type for property '{property}' in entity '{entity}': {details}")]
    InvalidType {
        entity: String,
        property: String,
        details: String,
    },

    /// Property declared twice in the same schema
    #[error("Property '{name}' is declared more than once in entity '{entity}'")]
    DuplicateProperty { entity: String, name: String },
}

/// Errors raised while constructing an entity instance from a value mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Construction input was not a mapping
    #[error("Argument error: expected {expected}, got {actual}")]
    ArgumentError { expected: String, actual: String },

    /// Required properties were neither supplied nor defaulted
    #[error("Entity '{entity}' is missing required properties: {}", .missing.join(", "))]
    MissingRequiredProperties { entity: String, missing: Vec<String> },

    /// Input names a property the schema does not declare
    #[error("Unknown property '{property}' for entity '{entity}'")]
    UnknownProperty { entity: String, property: String },

    /// Property value has the wrong JSON type
    #[error("Property '{property}' has invalid type, expected {expected}, got {actual}")]
    InvalidPropertyType {
        property: String,
        expected: String,
        actual: String,
    },

    /// Validated properties belong to a different schema
    #[error("Properties were validated against the schema of '{actual}', not the schema of '{expected}'")]
    EntityMismatch { expected: String, actual: String },
}

/// Result type alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Result type alias for schema declarations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type alias for value validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl EntityError {
    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

impl ValidationError {
    /// Create an argument error for input that is not a mapping
    pub fn not_a_mapping(actual: impl Into<String>) -> Self {
        Self::ArgumentError {
            expected: "a mapping of property names to values (JSON object)".to_string(),
            actual: actual.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidPropertyType {
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_properties_message_lists_names() {
        let error = ValidationError::MissingRequiredProperties {
            entity: "DiscoveryDocument".to_string(),
            missing: vec!["guid".to_string(), "public_key".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Entity 'DiscoveryDocument' is missing required properties: guid, public_key"
        );
    }

    #[test]
    fn test_argument_error_names_mapping() {
        let error = ValidationError::not_a_mapping("null");
        assert!(error.to_string().contains("mapping"));
        assert!(error.to_string().contains("got null"));
    }

    #[test]
    fn test_validation_error_converts_into_entity_error() {
        let error: EntityError = ValidationError::not_a_mapping("array").into();
        assert!(matches!(error, EntityError::Validation(_)));
    }
}
