//! Tests for streams module

use super::*;
use crate::error::Error;
use crate::http::Classification;
use crate::types::PageToken;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_registry_has_every_resource() {
    assert_eq!(
        list_resources(),
        vec![
            "contacts",
            "customers",
            "appointments",
            "assets",
            "contracts",
            "estimates",
            "items",
            "leads",
            "portal_users",
            "products",
            "purchase_orders",
        ]
    );
}

#[test]
fn test_get_resource() {
    let assets = get_resource("assets").unwrap();
    assert_eq!(assets.path(), "/customer_assets");
    assert_eq!(assets.records_path(), "$.assets[*]");

    let leads = get_resource("leads").unwrap();
    assert_eq!(leads.records_path(), "$.customers[*]");
    assert_eq!(leads.primary_keys, &["id"]);

    assert!(get_resource("tickets").is_none());
}

#[test]
fn test_select_resources() {
    let all = select_resources::<&str>(&[]).unwrap();
    assert_eq!(all.len(), RESOURCES.len());

    let picked = select_resources(&["items", " contacts ", "items"]).unwrap();
    let names: Vec<_> = picked.iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["items", "contacts"]);

    let err = select_resources(&["items", "tickets"]).unwrap_err();
    assert!(matches!(err, Error::StreamNotFound { ref stream } if stream == "tickets"));
}

#[test]
fn test_builtin_resources_tolerate_401_and_retry_429() {
    for resource in RESOURCES {
        let classifier = resource.classifier();
        assert_eq!(classifier.classify(401, ""), Classification::Ignorable);
        assert!(classifier.classify(429, "").is_retriable());
        assert!(classifier.classify(404, "").is_fatal());
    }
}

#[test]
fn test_builtin_params_have_no_ordering() {
    let contacts = get_resource("contacts").unwrap();
    let params = contacts.build_params(PageToken::new(2), Some(50));
    assert_eq!(
        params.to_query(),
        vec![("page", "2".to_string()), ("per_page", "50".to_string())]
    );
}

struct OrderedResource;

impl Resource for OrderedResource {
    fn name(&self) -> &str {
        "tickets"
    }

    fn path(&self) -> &str {
        "/tickets"
    }

    fn records_path(&self) -> &str {
        "$.tickets[*]"
    }

    fn ordering_key(&self) -> Option<&str> {
        Some("updated_at")
    }
}

#[test]
fn test_trait_defaults() {
    let resource = OrderedResource;
    let params = resource.build_params(None, None);
    assert_eq!(
        params.to_query(),
        vec![
            ("sort", "asc".to_string()),
            ("order_by", "updated_at".to_string())
        ]
    );
    assert_eq!(resource.classifier().classify(401, ""), Classification::Ignorable);

    let record = json!({"id": 5});
    assert_eq!(resource.post_process(record.clone()).unwrap(), record);
}

// ============================================================================
// Post-processor Tests
// ============================================================================

#[test]
fn test_normalizer_stringifies_ids() {
    let record = json!({
        "id": 12,
        "name": "Acme",
        "customer": {
            "id": 7,
            "contacts": [{"id": 1, "name": "a"}, {"id": "2"}, {"name": "no id"}]
        },
        "contacts": [{"id": 3}]
    });

    let out = IdentifierNormalizer.post_process(record).unwrap();
    assert_eq!(
        out,
        json!({
            "id": "12",
            "name": "Acme",
            "customer": {
                "id": "7",
                "contacts": [{"id": "1", "name": "a"}, {"id": "2"}, {"name": "no id"}]
            },
            "contacts": [{"id": "3"}]
        })
    );
}

#[test]
fn test_normalizer_tolerates_missing_structures() {
    let record = json!({"name": "bare"});
    assert_eq!(IdentifierNormalizer.post_process(record.clone()).unwrap(), record);

    let record = json!({"id": 1, "customer": null, "contacts": null});
    assert_eq!(
        IdentifierNormalizer.post_process(record).unwrap(),
        json!({"id": "1", "customer": null, "contacts": null})
    );

    let record = json!({"customer": {"firstname": "x"}});
    assert_eq!(IdentifierNormalizer.post_process(record.clone()).unwrap(), record);
}

#[test]
fn test_normalizer_rejects_malformed_records() {
    let err = IdentifierNormalizer.post_process(json!([1, 2])).unwrap_err();
    assert!(matches!(err, Error::PostProcess { .. }));

    let err = IdentifierNormalizer
        .post_process(json!({"id": 1, "contacts": "oops"}))
        .unwrap_err();
    assert!(err.to_string().contains("'contacts' is a string"));

    let err = IdentifierNormalizer
        .post_process(json!({"customer": {"id": 9, "contacts": {"id": 1}}}))
        .unwrap_err();
    assert!(err.to_string().contains("customer.contacts"));
}

#[test]
fn test_customer_without_id_is_left_as_is() {
    let record = json!({
        "id": 5,
        "customer": {"firstname": "Ada", "contacts": [{"id": 1}, {"id": 2}]},
    });
    let out = IdentifierNormalizer.post_process(record).unwrap();
    assert_eq!(
        out,
        json!({
            "id": "5",
            "customer": {"firstname": "Ada", "contacts": [{"id": 1}, {"id": 2}]},
        })
    );

    let record = json!({"customer": {"id": null, "contacts": "not checked"}});
    assert_eq!(IdentifierNormalizer.post_process(record.clone()).unwrap(), record);
}

#[test]
fn test_noop_post_processor() {
    let record = json!({"id": 9, "contacts": "anything"});
    assert_eq!(NoopPostProcessor.post_process(record.clone()).unwrap(), record);
}

#[test]
fn test_definition_routes_through_its_post_processor() {
    let items = get_resource("items").unwrap();
    assert_eq!(
        items.post_process(json!({"id": 44})).unwrap(),
        json!({"id": "44"})
    );
}
