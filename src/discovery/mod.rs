//! Account discovery documents.
//!
//! A discovery document is an XRD descriptor that maps an account handle to
//! the resources remote servers need: profile card, seed location, GUID,
//! profile page, Atom feed, Salmon endpoint and public key.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <XRD xmlns="http://docs.oasis-open.org/ns/xri/xrd-1.0">
//!   <Subject>acct:alice@pod.example.org</Subject>
//!   <Alias>https://pod.example.org/people/7dba7ca0</Alias>
//!   <Link rel="http://microformats.org/profile/hcard" type="text/html" href="..."/>
//!   <Link rel="http://joindiaspora.com/seed_location" type="text/html" href="..."/>
//!   <Link rel="http://joindiaspora.com/guid" type="text/html" href="..."/>
//!   <Link rel="http://webfinger.net/rel/profile-page" type="text/html" href="..."/>
//!   <Link rel="http://schemas.google.com/g/2010#updates-from" type="application/atom+xml" href="..."/>
//!   <Link rel="salmon" href="..."/>
//!   <Link rel="diaspora-public-key" type="RSA" href="..."/>
//! </XRD>
//! ```

mod config;
mod document;
mod xml;


pub use config::ParserConfig;
pub use document::DiscoveryDocument;

/// XRD 1.0 namespace
pub const XRD_NAMESPACE: &str = "http://docs.oasis-open.org/ns/xri/xrd-1.0";

/// Link relation of the profile card
pub const HCARD_REL: &str = "http://microformats.org/profile/hcard";

/// Link relation of the account's home server
pub const SEED_REL: &str = "http://joindiaspora.com/seed_location";

/// Link relation carrying the account GUID
pub const GUID_REL: &str = "http://joindiaspora.com/guid";

/// Link relation of the profile page
pub const PROFILE_PAGE_REL: &str = "http://webfinger.net/rel/profile-page";

/// Link relation of the Atom feed
pub const ATOM_REL: &str = "http://schemas.google.com/g/2010#updates-from";

/// Link relation of the Salmon endpoint
pub const SALMON_REL: &str = "salmon";

/// Link relation carrying the base64 encoded public key
pub const PUBLIC_KEY_REL: &str = "diaspora-public-key";
