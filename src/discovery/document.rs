//! The discovery document entity.

use crate::discovery::xml;
use crate::entity::{Entity, Properties};
use crate::error::{SchemaResult, ValidationResult};
use crate::schema::{DefaultValue, Schema, SchemaBuilder};
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

/// Account discovery document.
///
/// Maps an account handle to the resources other servers need to federate
/// with it. Instances are immutable: build one from local data with
/// [`Entity::new`] or parse a remote one with
/// [`DiscoveryDocument::from_xml`].
///
/// `public_key` holds the decoded key text; the base64 form only exists on
/// the wire. The other properties must only contain characters an XML
/// document can carry.
///
/// ```rust
/// use serde_json::json;
/// use xrd_entity::{DiscoveryDocument, Entity};
///
/// let document = DiscoveryDocument::new(json!({
///     "acct_uri": "acct:alice@pod.example.org",
///     "hcard_url": "https://pod.example.org/hcard/users/7dba7ca0",
///     "seed_url": "https://pod.example.org/",
///     "profile_url": "https://pod.example.org/u/alice",
///     "atom_url": "https://pod.example.org/public/alice.atom",
///     "salmon_url": "https://pod.example.org/receive/users/7dba7ca0",
///     "guid": "7dba7ca01d64013485eb3c970ea0e2f6",
///     "public_key": "-----BEGIN PUBLIC KEY-----\nABCDEF==\n-----END PUBLIC KEY-----",
/// }))
/// .unwrap();
///
/// assert_eq!(document.alias_url(), "");
/// let parsed = DiscoveryDocument::from_xml(&document.to_xml()).unwrap();
/// assert_eq!(parsed, document);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryDocument {
    properties: Properties,
}

impl DiscoveryDocument {
    /// Entity name used in the schema and in error messages.
    pub const ENTITY_NAME: &'static str = "DiscoveryDocument";

    fn declare() -> SchemaResult<Schema> {
        let mut builder = SchemaBuilder::new(Self::ENTITY_NAME);
        builder
            .declare_scalar("acct_uri")?
            .declare_scalar_with_default("alias_url", DefaultValue::from(""))?
            .declare_scalar("hcard_url")?
            .declare_scalar("seed_url")?
            .declare_scalar("profile_url")?
            .declare_scalar("atom_url")?
            .declare_scalar("salmon_url")?
            .declare_scalar("guid")?
            .declare_scalar("public_key")?;
        Ok(builder.build())
    }

    fn field(&self, name: &str) -> &str {
        self.properties.scalar(name).unwrap_or_default()
    }

    /// Account URI, `acct:user@host`
    pub fn acct_uri(&self) -> &str {
        self.field("acct_uri")
    }

    /// Alternate URL of the account; empty when none
    pub fn alias_url(&self) -> &str {
        self.field("alias_url")
    }

    /// URL of the profile card
    pub fn hcard_url(&self) -> &str {
        self.field("hcard_url")
    }

    /// URL of the account's home server
    pub fn seed_url(&self) -> &str {
        self.field("seed_url")
    }

    /// URL of the human-readable profile page
    pub fn profile_url(&self) -> &str {
        self.field("profile_url")
    }

    /// URL of the public Atom feed
    pub fn atom_url(&self) -> &str {
        self.field("atom_url")
    }

    /// Endpoint receiving Salmon slaps
    pub fn salmon_url(&self) -> &str {
        self.field("salmon_url")
    }

    /// Globally unique account identifier
    pub fn guid(&self) -> &str {
        self.field("guid")
    }

    /// Public key, decoded
    pub fn public_key(&self) -> &str {
        self.field("public_key")
    }
}

impl Entity for DiscoveryDocument {
    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| Self::declare().expect("discovery document schema declaration"))
    }

    fn from_properties(properties: Properties) -> ValidationResult<Self> {
        properties.check_entity(Self::schema())?;
        xml::check_xml_characters(&properties)?;
        Ok(Self { properties })
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

impl Serialize for DiscoveryDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.properties.serialize(serializer)
    }
}
