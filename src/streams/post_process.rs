//! Record post-processing hooks
//!
//! Syncro returns numeric identifiers; downstream consumers expect them as
//! strings. Missing nested objects or arrays are left alone.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Per-record transformation applied after extraction, before yielding
pub trait RecordPostProcessor: Send + Sync {
    /// Transform one record
    fn post_process(&self, record: Value) -> Result<Value>;
}

/// Passes records through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPostProcessor;

impl RecordPostProcessor for NoopPostProcessor {
    fn post_process(&self, record: Value) -> Result<Value> {
        Ok(record)
    }
}

/// Rewrites numeric ids to strings
///
/// Touches `id`, `customer.id`, `customer.contacts[*].id` and
/// `contacts[*].id`. The `customer` block is only rewritten when it carries
/// an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierNormalizer;

impl RecordPostProcessor for IdentifierNormalizer {
    fn post_process(&self, mut record: Value) -> Result<Value> {
        let kind = type_name(&record);
        let Value::Object(row) = &mut record else {
            return Err(Error::post_process(format!(
                "expected a JSON object, got {kind}"
            )));
        };

        stringify_id(row);

        if let Some(customer) = row.get_mut("customer") {
            match customer {
                // An embedded customer without an id is passed through untouched
                Value::Object(customer) if has_id(customer) => {
                    stringify_contact_ids(customer, "customer.contacts")?;
                    stringify_id(customer);
                }
                Value::Object(_) => {}
                Value::Null => {}
                other => {
                    return Err(Error::post_process(format!(
                        "'customer' is a {}, expected an object",
                        type_name(other)
                    )))
                }
            }
        }

        stringify_contact_ids(row, "contacts")?;
        Ok(record)
    }
}

fn has_id(object: &Map<String, Value>) -> bool {
    !matches!(object.get("id"), None | Some(Value::Null))
}

fn stringify_id(object: &mut Map<String, Value>) {
    if let Some(Value::Number(n)) = object.get("id") {
        let id = n.to_string();
        object.insert("id".to_string(), Value::String(id));
    }
}

fn stringify_contact_ids(object: &mut Map<String, Value>, label: &str) -> Result<()> {
    match object.get_mut("contacts") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(contacts)) => {
            for contact in contacts.iter_mut() {
                if let Value::Object(contact) = contact {
                    stringify_id(contact);
                }
            }
            Ok(())
        }
        Some(other) => Err(Error::post_process(format!(
            "'{label}' is a {}, expected an array",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
