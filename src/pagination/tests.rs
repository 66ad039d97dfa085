//! Tests for pagination module

use super::*;
use crate::types::PageToken;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;

fn token(page: u64) -> PageToken {
    PageToken::new(page).unwrap()
}

fn next_page_header(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("X-Next-Page", HeaderValue::from_str(value).unwrap());
    headers
}

// ============================================================================
// PageCursor Tests
// ============================================================================

#[test]
fn test_cursor_advances_within_total() {
    let cursor = PageCursor::default();
    let headers = HeaderMap::new();

    let body = json!({"meta": {"page": 1, "total_pages": 3}});
    assert_eq!(
        cursor.next_page(None, &body, &headers),
        NextPage::Continue(token(2))
    );

    let body = json!({"meta": {"page": 2, "total_pages": 3}});
    assert_eq!(
        cursor.next_page(Some(token(2)), &body, &headers),
        NextPage::Continue(token(3))
    );
}

#[test]
fn test_cursor_stops_on_last_page() {
    let cursor = PageCursor::default();
    let body = json!({"meta": {"page": 3, "total_pages": 3}});
    assert!(cursor
        .next_page(Some(token(3)), &body, &HeaderMap::new())
        .is_done());
}

#[test]
fn test_cursor_property_over_range() {
    let cursor = PageCursor::default();
    let headers = HeaderMap::new();
    for total in 0..6u64 {
        for current in 1..8u64 {
            let body = json!({"meta": {"page": current, "total_pages": total}});
            let expected = if current + 1 <= total {
                NextPage::Continue(token(current + 1))
            } else {
                NextPage::Done
            };
            assert_eq!(cursor.next_page(None, &body, &headers), expected);
        }
    }
}

#[test]
fn test_cursor_fails_closed_without_total_pages() {
    let cursor = PageCursor::default();
    let body = json!({"meta": {"page": 1}});
    // header is ignored because the body has a current page
    assert!(cursor
        .next_page(None, &body, &next_page_header("2"))
        .is_done());
}

#[test]
fn test_cursor_accepts_string_metadata() {
    let cursor = PageCursor::default();
    let body = json!({"meta": {"page": "1", "total_pages": "2"}});
    assert_eq!(
        cursor.next_page(None, &body, &HeaderMap::new()),
        NextPage::Continue(token(2))
    );
}

#[test]
fn test_cursor_header_fallback() {
    let cursor = PageCursor::default();
    let body = json!({"contacts": []});

    assert_eq!(
        cursor.next_page(None, &body, &next_page_header("4")),
        NextPage::Continue(token(4))
    );
    assert!(cursor.next_page(None, &body, &HeaderMap::new()).is_done());
    assert!(cursor
        .next_page(None, &body, &next_page_header(""))
        .is_done());
    assert!(cursor
        .next_page(None, &body, &next_page_header("0"))
        .is_done());
}

#[test]
fn test_cursor_never_moves_backwards() {
    let cursor = PageCursor::default();
    let body = json!({"meta": {"page": 1, "total_pages": 9}});
    assert!(cursor
        .next_page(Some(token(2)), &body, &HeaderMap::new())
        .is_done());

    let body = json!({});
    assert!(cursor
        .next_page(Some(token(5)), &body, &next_page_header("5"))
        .is_done());
}

#[test]
fn test_cursor_custom_locations() {
    let cursor = PageCursor::new("$.pagination.current", "$.pagination.pages")
        .with_next_page_header("X-Page-Next");
    let body = json!({"pagination": {"current": 1, "pages": 2}});
    assert_eq!(
        cursor.next_page(None, &body, &HeaderMap::new()),
        NextPage::Continue(token(2))
    );

    let mut headers = HeaderMap::new();
    headers.insert("X-Page-Next", HeaderValue::from_static("7"));
    assert_eq!(
        cursor.next_page(None, &json!({}), &headers),
        NextPage::Continue(token(7))
    );
}

#[test]
fn test_next_page_conversions() {
    assert_eq!(NextPage::from(None), NextPage::Done);
    assert_eq!(NextPage::from(Some(token(2))).token(), Some(token(2)));
    assert_eq!(NextPage::Done.token(), None);
}

// ============================================================================
// PageSizeThrottle Tests
// ============================================================================

#[test]
fn test_throttle_shrink_sequence_from_unset() {
    let mut throttle = PageSizeThrottle::new(None);
    assert_eq!(throttle.current(), None);

    let sizes: Vec<u32> = (0..8).map(|_| throttle.shrink()).collect();
    assert_eq!(sizes, vec![16, 8, 4, 2, 1, 1, 1, 1]);
    assert!(throttle.at_floor());
}

#[test]
fn test_throttle_shrink_from_configured_size() {
    let mut throttle = PageSizeThrottle::new(Some(100));
    assert_eq!(throttle.current(), Some(100));
    assert_eq!(throttle.shrink(), 50);
    assert_eq!(throttle.shrink(), 25);
    assert_eq!(throttle.shrink(), 12);
    assert_eq!(throttle.current(), Some(12));
    assert!(!throttle.at_floor());
}

#[test]
fn test_throttle_zero_means_unset() {
    let mut throttle = PageSizeThrottle::new(Some(0));
    assert_eq!(throttle.current(), None);
    assert_eq!(throttle.shrink(), INITIAL_SHRINK_SIZE);
}

#[test]
fn test_throttles_are_independent() {
    let mut a = PageSizeThrottle::new(None);
    let b = PageSizeThrottle::new(None);
    a.shrink();
    assert_eq!(a.current(), Some(16));
    assert_eq!(b.current(), None);
}

// ============================================================================
// RequestParams Tests
// ============================================================================

#[test]
fn test_first_request_has_no_params() {
    assert!(RequestParams::new(None, None).to_query().is_empty());
}

#[test]
fn test_request_params_order() {
    let params = RequestParams::new(Some(token(3)), Some(25)).with_order_by(Some("updated_at"));
    assert_eq!(
        params.to_query(),
        vec![
            ("page", "3".to_string()),
            ("per_page", "25".to_string()),
            ("sort", "asc".to_string()),
            ("order_by", "updated_at".to_string()),
        ]
    );
}

#[test]
fn test_ordering_is_always_ascending() {
    for key in ["id", "updated_at", "created_at"] {
        let query = RequestParams::new(None, None).with_order_by(Some(key)).to_query();
        assert_eq!(
            query,
            vec![
                ("sort", SORT_ASCENDING.to_string()),
                ("order_by", key.to_string()),
            ]
        );
    }
    assert_eq!(SORT_ASCENDING, "asc");
}

#[test]
fn test_request_params_without_ordering_key() {
    let params = RequestParams::new(Some(token(2)), None).with_order_by(None);
    assert_eq!(params.to_query(), vec![("page", "2".to_string())]);
}

#[test]
fn test_request_params_with_page_size() {
    let params = RequestParams::new(None, None).with_page_size(Some(16));
    assert_eq!(params.to_query(), vec![("per_page", "16".to_string())]);
}
