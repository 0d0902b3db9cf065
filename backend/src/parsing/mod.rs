//! Parsers for call warehouse exports.
//!
//! - [`calls_json`]: JSON rows as exported from the warehouse query, either a
//!   bare array or wrapped in a `{"calls": [...]}` object.

pub mod calls_json;


pub use calls_json::{parse_calls_json, parse_calls_json_str, parse_calls_value};
