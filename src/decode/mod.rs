//! Response decoder module
//!
//! Pulls records and scalar metadata out of JSON response bodies.
//!
//! # Overview
//!
//! Record locations are JSONPath-like strings (`$.contacts[*]`). Plain
//! dotted paths are walked directly; anything richer (filters, nested
//! wildcards, recursive descent) is delegated to jsonpath-rust.

mod decoders;

pub use decoders::{extract_u64, extract_value, JsonDecoder};
