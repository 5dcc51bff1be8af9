//! Common test utilities for discovery document and entity tests.

pub mod fixtures;
