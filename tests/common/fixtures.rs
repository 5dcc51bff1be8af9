//! Test fixtures for discovery documents.
//!
//! XML fixtures live under `tests/fixtures/` and describe the same account as
//! [`alice_values`].

#![allow(dead_code)]

use serde_json::{Value, json};

/// Decoded public key published by the fixture account.
pub const ALICE_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----\nMIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAu3CTJ\n-----END PUBLIC KEY-----\n";

/// Load a fixture from the fixtures directory.
pub fn load_fixture(path: &str) -> String {
    let fixture_path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), path);
    std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", fixture_path))
}

/// Canonical discovery document of the fixture account
pub fn canonical_xml() -> String {
    load_fixture("discovery/canonical.xml")
}

/// Legacy-format discovery document of the fixture account
pub fn legacy_xml() -> String {
    load_fixture("discovery/legacy.xml")
}

/// Property values of the fixture account
pub fn alice_values() -> Value {
    json!({
        "acct_uri": "acct:alice@pod.example.org",
        "alias_url": "https://pod.example.org/people/7dba7ca01d64013485eb3c970ea0e2f6",
        "hcard_url": "https://pod.example.org/hcard/users/7dba7ca01d64013485eb3c970ea0e2f6",
        "seed_url": "https://pod.example.org/",
        "profile_url": "https://pod.example.org/u/alice",
        "atom_url": "https://pod.example.org/public/alice.atom",
        "salmon_url": "https://pod.example.org/receive/users/7dba7ca01d64013485eb3c970ea0e2f6",
        "guid": "7dba7ca01d64013485eb3c970ea0e2f6",
        "public_key": ALICE_PUBLIC_KEY,
    })
}
