//! XRD codec for [`DiscoveryDocument`].
//!
//! Output always follows the canonical layout. Input is read with a namespace
//! aware event reader and `Link` elements are dispatched on their `rel`
//! attribute alone, so documents written by older servers (blank lines between
//! links, `type = "text/html"` with spaces around `=`, different link order)
//! produce the same entity as canonical ones.

use crate::discovery::config::ParserConfig;
use crate::discovery::document::DiscoveryDocument;
use crate::discovery::{
    ATOM_REL, GUID_REL, HCARD_REL, PROFILE_PAGE_REL, PUBLIC_KEY_REL, SALMON_REL, SEED_REL,
    XRD_NAMESPACE,
};
use crate::entity::{Entity, Properties};
use crate::error::{EntityError, EntityResult, ValidationError, ValidationResult};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{debug, trace, warn};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use serde_json::{Map, Value};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// How a property is carried in a link's `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HrefEncoding {
    Plain,
    Base64,
}

/// One `Link` element of the document, in output order.
#[derive(Debug)]
struct LinkRelation {
    property: &'static str,
    rel: &'static str,
    link_type: Option<&'static str>,
    encoding: HrefEncoding,
}

const LINK_RELATIONS: &[LinkRelation] = &[
    LinkRelation {
        property: "hcard_url",
        rel: HCARD_REL,
        link_type: Some("text/html"),
        encoding: HrefEncoding::Plain,
    },
    LinkRelation {
        property: "seed_url",
        rel: SEED_REL,
        link_type: Some("text/html"),
        encoding: HrefEncoding::Plain,
    },
    LinkRelation {
        property: "guid",
        rel: GUID_REL,
        link_type: Some("text/html"),
        encoding: HrefEncoding::Plain,
    },
    LinkRelation {
        property: "profile_url",
        rel: PROFILE_PAGE_REL,
        link_type: Some("text/html"),
        encoding: HrefEncoding::Plain,
    },
    LinkRelation {
        property: "atom_url",
        rel: ATOM_REL,
        link_type: Some("application/atom+xml"),
        encoding: HrefEncoding::Plain,
    },
    LinkRelation {
        property: "salmon_url",
        rel: SALMON_REL,
        link_type: None,
        encoding: HrefEncoding::Plain,
    },
    LinkRelation {
        property: "public_key",
        rel: PUBLIC_KEY_REL,
        link_type: Some("RSA"),
        encoding: HrefEncoding::Base64,
    },
];

impl DiscoveryDocument {
    /// Render the canonical XRD document.
    ///
    /// The layout is fixed: `Subject`, `Alias`, then one `Link` per remaining
    /// property in the order hcard, seed, guid, profile, atom, salmon, public
    /// key. Values are XML-escaped and the public key is base64 encoded.
    /// Line breaks and tabs in `href` values are written as character
    /// references so that attribute value normalization keeps them.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!("<XRD xmlns=\"{XRD_NAMESPACE}\">\n"));
        xml.push_str(&format!("  <Subject>{}</Subject>\n", escape_text(self.acct_uri())));
        xml.push_str(&format!("  <Alias>{}</Alias>\n", escape_text(self.alias_url())));

        for relation in LINK_RELATIONS {
            let value = self.properties().scalar(relation.property).unwrap_or_default();
            let href = match relation.encoding {
                HrefEncoding::Plain => escape_attribute(value),
                HrefEncoding::Base64 => STANDARD.encode(value),
            };
            match relation.link_type {
                Some(link_type) => xml.push_str(&format!(
                    "  <Link rel=\"{}\" type=\"{}\" href=\"{}\"/>\n",
                    relation.rel, link_type, href
                )),
                None => xml.push_str(&format!(
                    "  <Link rel=\"{}\" href=\"{}\"/>\n",
                    relation.rel, href
                )),
            }
        }

        xml.push_str("</XRD>\n");
        xml
    }

    /// Parse a discovery document with the default [`ParserConfig`].
    ///
    /// # Errors
    ///
    /// - [`EntityError::InvalidDocument`] if the text is not well-formed XML,
    ///   including empty input
    /// - [`EntityError::InvalidData`] if the root is not an XRD element, or it
    ///   has no `Subject` or no `Link` with a known relation, or the public key
    ///   is not valid base64 text
    /// - [`EntityError::Validation`] if a required link is absent
    pub fn from_xml(xml: &str) -> EntityResult<Self> {
        Self::from_xml_with_config(xml, &ParserConfig::default())
    }

    /// Parse a discovery document.
    pub fn from_xml_with_config(xml: &str, config: &ParserConfig) -> EntityResult<Self> {
        let result = read_xrd(xml, config)
            .and_then(collect_values)
            .and_then(Self::new);

        match &result {
            Ok(document) => debug!("Parsed discovery document for {}", document.acct_uri()),
            Err(error) => debug!("Rejected discovery document: {}", error),
        }
        result
    }
}

/// Check that every value written as XML text only holds characters XML 1.0
/// can carry. The public key is exempt since it is written as base64.
pub(crate) fn check_xml_characters(properties: &Properties) -> ValidationResult<()> {
    let text_properties = ["acct_uri", "alias_url"].into_iter().chain(
        LINK_RELATIONS
            .iter()
            .filter(|relation| relation.encoding == HrefEncoding::Plain)
            .map(|relation| relation.property),
    );
    for property in text_properties {
        let value = properties.scalar(property).unwrap_or_default();
        if let Some(invalid) = value.chars().find(|c| !is_xml_char(*c)) {
            return Err(ValidationError::invalid_type(
                property,
                "text of XML characters",
                format!("string containing U+{:04X}", u32::from(invalid)),
            ));
        }
    }
    Ok(())
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Escape element content. `\r` would be folded into `\n` by a conforming
/// reader.
fn escape_text(value: &str) -> String {
    escape(value).replace('\r', "&#13;")
}

/// Escape an attribute value, keeping whitespace characters as references.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Subject,
    Alias,
}

#[derive(Debug, Default)]
struct LinkElement {
    rel: Option<String>,
    href: Option<String>,
}

/// Raw content of an XRD document before dispatch.
#[derive(Debug, Default)]
struct XrdData {
    recognized_root: bool,
    subject: Option<String>,
    alias: Option<String>,
    links: Vec<LinkElement>,
}

impl XrdData {
    fn set_text(&mut self, field: TextField, text: String) {
        // First occurrence wins.
        let slot = match field {
            TextField::Subject => &mut self.subject,
            TextField::Alias => &mut self.alias,
        };
        if slot.is_none() {
            *slot = Some(text);
        }
    }
}

fn read_xrd(xml: &str, config: &ParserConfig) -> EntityResult<XrdData> {
    // Text is kept verbatim; whitespace between elements is dropped below.
    let mut reader = NsReader::from_str(xml);

    let mut data = XrdData::default();
    let mut root_seen = false;
    let mut depth = 0usize;
    let mut field: Option<(TextField, String)> = None;

    loop {
        let (namespace, event) = match reader.read_resolved_event() {
            Ok(resolved) => resolved,
            Err(error) => {
                return Err(EntityError::invalid_document(format!("malformed XML: {}", error)));
            }
        };

        match event {
            Event::Start(start) => {
                match depth {
                    0 => open_root(&mut data, &mut root_seen, &namespace, &start, config)?,
                    1 if data.recognized_root => {
                        if is_element(&namespace, &start, "Subject", config) {
                            field = Some((TextField::Subject, String::new()));
                        } else if is_element(&namespace, &start, "Alias", config) {
                            field = Some((TextField::Alias, String::new()));
                        } else if is_element(&namespace, &start, "Link", config) {
                            data.links.push(read_link(&start)?);
                        }
                    }
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(start) => match depth {
                0 => open_root(&mut data, &mut root_seen, &namespace, &start, config)?,
                1 if data.recognized_root => {
                    if is_element(&namespace, &start, "Subject", config) {
                        data.set_text(TextField::Subject, String::new());
                    } else if is_element(&namespace, &start, "Alias", config) {
                        data.set_text(TextField::Alias, String::new());
                    } else if is_element(&namespace, &start, "Link", config) {
                        data.links.push(read_link(&start)?);
                    }
                }
                _ => {}
            },
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| EntityError::invalid_document("unexpected closing tag"))?;
                if depth == 1 {
                    if let Some((kind, text)) = field.take() {
                        data.set_text(kind, text);
                    }
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|error| {
                    EntityError::invalid_document(format!("invalid character data: {}", error))
                })?;
                append_text(depth, &mut field, &text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8(cdata.into_inner().into_owned()).map_err(|_| {
                    EntityError::invalid_document("CDATA section is not valid UTF-8")
                })?;
                append_text(depth, &mut field, &text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(EntityError::invalid_document("document has no root element"));
    }
    if depth != 0 {
        return Err(EntityError::invalid_document("document ends inside an element"));
    }
    Ok(data)
}

fn open_root(
    data: &mut XrdData,
    root_seen: &mut bool,
    namespace: &ResolveResult,
    start: &BytesStart,
    config: &ParserConfig,
) -> EntityResult<()> {
    if *root_seen {
        return Err(EntityError::invalid_document(
            "document has more than one root element",
        ));
    }
    *root_seen = true;
    data.recognized_root = is_element(namespace, start, "XRD", config);
    if !data.recognized_root {
        debug!(
            "Root element '{}' is not an XRD element",
            String::from_utf8_lossy(start.name().as_ref())
        );
    }
    Ok(())
}

fn append_text(
    depth: usize,
    field: &mut Option<(TextField, String)>,
    text: &str,
) -> EntityResult<()> {
    if depth == 0 {
        if !text.trim().is_empty() {
            return Err(EntityError::invalid_document(
                "character data outside the root element",
            ));
        }
    } else if let Some((_, buffer)) = field.as_mut() {
        buffer.push_str(text);
    }
    Ok(())
}

fn is_element(
    namespace: &ResolveResult,
    start: &BytesStart,
    local_name: &str,
    config: &ParserConfig,
) -> bool {
    if start.local_name().as_ref() != local_name.as_bytes() {
        return false;
    }
    !config.require_xrd_namespace
        || matches!(namespace, ResolveResult::Bound(Namespace(ns)) if *ns == XRD_NAMESPACE.as_bytes())
}

fn read_link(start: &BytesStart) -> EntityResult<LinkElement> {
    let mut link = LinkElement::default();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| {
            EntityError::invalid_document(format!("malformed Link attribute: {}", error))
        })?;
        let value = attribute.unescape_value().map_err(|error| {
            EntityError::invalid_document(format!("malformed Link attribute value: {}", error))
        })?;
        match attribute.key.local_name().as_ref() {
            b"rel" => link.rel = Some(value.trim().to_string()),
            b"href" => link.href = Some(value.into_owned()),
            _ => {}
        }
    }
    Ok(link)
}

fn collect_values(data: XrdData) -> EntityResult<Value> {
    if !data.recognized_root {
        return Err(EntityError::invalid_data("root element is not an XRD element"));
    }
    let subject = data
        .subject
        .ok_or_else(|| EntityError::invalid_data("document has no Subject"))?;

    let mut values = Map::new();
    values.insert("acct_uri".to_string(), Value::String(subject));
    if let Some(alias) = data.alias {
        values.insert("alias_url".to_string(), Value::String(alias));
    }

    let mut recognized = 0usize;
    for link in &data.links {
        let Some(rel) = link.rel.as_deref() else {
            warn!("Skipping Link element without rel attribute");
            continue;
        };
        let Some(relation) = LINK_RELATIONS.iter().find(|relation| relation.rel == rel) else {
            debug!("Ignoring Link with unknown rel '{}'", rel);
            continue;
        };
        recognized += 1;

        if values.contains_key(relation.property) {
            debug!("Ignoring repeated Link with rel '{}'", rel);
            continue;
        }
        let Some(href) = link.href.as_deref() else {
            debug!("Link with rel '{}' has no href", rel);
            continue;
        };

        let value = match relation.encoding {
            HrefEncoding::Plain => href.to_string(),
            HrefEncoding::Base64 => decode_base64(relation.property, href)?,
        };
        trace!("Link '{}' -> {}", rel, relation.property);
        values.insert(relation.property.to_string(), Value::String(value));
    }

    if recognized == 0 {
        return Err(EntityError::invalid_data(
            "document has no recognizable Link elements",
        ));
    }
    Ok(Value::Object(values))
}

fn decode_base64(property: &str, encoded: &str) -> EntityResult<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact).map_err(|error| {
        EntityError::invalid_data(format!("'{}' is not valid base64: {}", property, error))
    })?;
    String::from_utf8(bytes).map_err(|_| {
        EntityError::invalid_data(format!("'{}' does not decode to UTF-8 text", property))
    })
}
