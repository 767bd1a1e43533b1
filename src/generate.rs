//! Built-in plugins.
//!
//! Only one ships with the crate: [`json::ProtocolJsonPlugin`], which renders
//! an aggregate to Avro-protocol-shaped JSON. It doubles as the reference
//! implementation of the plugin contract -- deterministic, total over every
//! field-type variant, and scoped to a single output file.

pub mod json;
