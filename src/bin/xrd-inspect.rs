//! # XRD Discovery Document Inspector
//!
//! A command-line utility that parses discovery documents with the same codec
//! the library uses and prints the resulting entity, so documents fetched from
//! remote servers can be checked by hand.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin xrd-inspect alice.xml
//! curl -s https://pod.example.org/webfinger?q=acct:alice@pod.example.org | cargo run --bin xrd-inspect -
//! cargo run --bin xrd-inspect --lenient other-namespace.xml
//! ```
//!
//! ## Output Examples
//!
//! ```text
//! Inspecting: alice.xml
//! ✓ Valid discovery document for acct:alice@pod.example.org
//! {
//!   "acct_uri": "acct:alice@pod.example.org",
//!   ...
//! }
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All documents parsed
//! - `1`: One or more documents were rejected or could not be read

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;
use xrd_entity::{DiscoveryDocument, EntityError, ParserConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("xrd-inspect");

    let mut config = ParserConfig::default();
    let mut paths = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--lenient" => config = config.with_require_xrd_namespace(false),
            _ => paths.push(arg.as_str()),
        }
    }

    if paths.is_empty() {
        eprintln!("Usage: {} [--lenient] <file>... ('-' reads stdin)", program);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} alice.xml", program);
        eprintln!("  {} --lenient legacy/*.xml", program);
        process::exit(1);
    }

    let mut error_count = 0;
    for path in &paths {
        println!("Inspecting: {}", path);
        match read_input(path) {
            Ok(xml) => {
                if let Err(e) = inspect(&xml, &config) {
                    eprintln!("❌ {}", describe(&e));
                    error_count += 1;
                }
            }
            Err(e) => {
                eprintln!("❌ Could not read '{}': {}", path, e);
                error_count += 1;
            }
        }
    }

    if paths.len() > 1 {
        println!("\nSummary:");
        println!("  Valid documents: {}", paths.len() - error_count);
        println!("  Rejected documents: {}", error_count);
    }
    if error_count > 0 {
        process::exit(1);
    }
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path)
    }
}

fn inspect(xml: &str, config: &ParserConfig) -> Result<(), EntityError> {
    let document = DiscoveryDocument::from_xml_with_config(xml, config)?;
    println!("✓ Valid discovery document for {}", document.acct_uri());

    match serde_json::to_string_pretty(&document) {
        Ok(pretty) => println!("{}", pretty),
        Err(e) => eprintln!("Could not render document: {}", e),
    }
    Ok(())
}

fn describe(error: &EntityError) -> String {
    match error {
        EntityError::InvalidDocument { .. } => format!("Not an XML document: {}", error),
        EntityError::InvalidData { .. } => format!("Unusable discovery document: {}", error),
        EntityError::Validation(_) | EntityError::Schema(_) => {
            format!("Incomplete discovery document: {}", error)
        }
    }
}
