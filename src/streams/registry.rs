//! Built-in Syncro resources
//!
//! Every resource the tap can extract, keyed by stream name. The table is
//! static; nothing is discovered at runtime.

use super::post_process::{IdentifierNormalizer, RecordPostProcessor};
use super::types::ResourceDefinition;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

const NORMALIZE_IDS: &dyn RecordPostProcessor = &IdentifierNormalizer;

const ID: &[&str] = &["id"];
const NO_KEYS: &[&str] = &[];
const IGNORE: &[u16] = &[401];
const EXTRA_RETRY: &[u16] = &[429];

const fn resource(
    name: &'static str,
    path: &'static str,
    records_path: &'static str,
    primary_keys: &'static [&'static str],
) -> ResourceDefinition {
    ResourceDefinition {
        name,
        path,
        records_path,
        primary_keys,
        ordering_key: None,
        ignore_statuses: IGNORE,
        extra_retry_statuses: EXTRA_RETRY,
        post_processor: NORMALIZE_IDS,
    }
}

/// All resources, in extraction order
pub static RESOURCES: &[ResourceDefinition] = &[
    resource("contacts", "/contacts", "$.contacts[*]", NO_KEYS),
    resource("customers", "/customers", "$.customers[*]", NO_KEYS),
    resource("appointments", "/appointments", "$.appointments[*]", ID),
    resource("assets", "/customer_assets", "$.assets[*]", NO_KEYS),
    resource("contracts", "/contracts", "$.contracts[*]", NO_KEYS),
    resource("estimates", "/estimates", "$.estimates[*]", ID),
    resource("items", "/items", "$.items[*]", ID),
    // Syncro returns leads under the "customers" key
    resource("leads", "/leads", "$.customers[*]", ID),
    resource("portal_users", "/portal_users", "$.portal_users[*]", ID),
    resource("products", "/products", "$.products[*]", ID),
    resource("purchase_orders", "/purchase_orders", "$.purchase_orders[*]", ID),
];

static BY_NAME: LazyLock<HashMap<&'static str, &'static ResourceDefinition>> =
    LazyLock::new(|| RESOURCES.iter().map(|r| (r.name, r)).collect());

/// Get a resource by stream name
pub fn get_resource(name: &str) -> Option<&'static ResourceDefinition> {
    BY_NAME.get(name).copied()
}

/// List all stream names in extraction order
pub fn list_resources() -> Vec<&'static str> {
    RESOURCES.iter().map(|r| r.name).collect()
}

/// Resolve requested stream names; an empty selection means every resource
///
/// Order follows the request and duplicates are dropped.
pub fn select_resources<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static ResourceDefinition>> {
    if names.is_empty() {
        return Ok(RESOURCES.iter().collect());
    }

    let mut selected: Vec<&'static ResourceDefinition> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref().trim();
        let resource = get_resource(name).ok_or_else(|| Error::stream_not_found(name))?;
        if !selected.iter().any(|r| r.name == resource.name) {
            selected.push(resource);
        }
    }
    Ok(selected)
}
