//! Decoding of paginated response envelopes.
//!
//! Every list endpoint wraps its items under an endpoint-specific key and may
//! carry a `next_cursor` that is a string, a number, null or absent entirely.
//! Only a present string or number continues pagination; everything else,
//! including an envelope whose shape does not match at all, is decoded as an
//! end-of-data page rather than an error. A malformed element inside the item
//! array is dropped individually so one bad record cannot blank the screen.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::page::{Cursor, Page};

/// Item key of the posts envelope.
pub const POSTS_KEY: &str = "posts";
/// Item key of the vibes envelope.
pub const VIBES_KEY: &str = "vibes";
/// Item key of the nearby-users envelope.
pub const USERS_KEY: &str = "users";
/// Item key of the stories envelope.
pub const STORIES_KEY: &str = "stories";

/// Decode one page envelope. `items_key` selects the per-endpoint array.
pub fn decode_page<T: DeserializeOwned>(body: Value, items_key: &str) -> Page<T> {
    let next_cursor = decode_cursor(body.get("next_cursor"));

    let items = match body.get(items_key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|value| match serde_json::from_value(value.clone()) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("dropping malformed {items_key} item: {e}");
                    None
                }
            })
            .collect(),
        _ => {
            log::warn!("page envelope missing {items_key} array, treating as end of data");
            return Page::end();
        }
    };

    Page::new(items, next_cursor)
}

fn decode_cursor(value: Option<&Value>) -> Option<Cursor> {
    match value {
        Some(Value::String(s)) => Some(Cursor::new(s.clone())),
        Some(Value::Number(n)) => Some(Cursor::new(n.to_string())),
        Some(Value::Null) | None => None,
        Some(other) => {
            log::warn!("unexpected next_cursor shape: {other}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::entity::Post;

    fn post_value(id: &str) -> Value {
        json!({
            "id": id,
            "author": "u1",
            "author_handle": "alice",
            "content": "hello",
            "created_at": "2024-01-15T10:00:00Z",
        })
    }

    #[test]
    fn test_decode_page_with_string_cursor() {
        let body = json!({
            "posts": [post_value("p1"), post_value("p2")],
            "next_cursor": "abc",
        });

        let page: Page<Post> = decode_page(body, POSTS_KEY);

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor, Some(Cursor::from("abc")));
    }

    #[test]
    fn test_decode_page_with_numeric_cursor() {
        let body = json!({
            "posts": [post_value("p1")],
            "next_cursor": 42,
        });

        let page: Page<Post> = decode_page(body, POSTS_KEY);

        assert_eq!(page.next_cursor, Some(Cursor::from(42u64)));
    }

    #[rstest]
    #[case(json!({"posts": [], "next_cursor": null}))]
    #[case(json!({"posts": []}))]
    fn test_null_or_absent_cursor_ends_pagination(#[case] body: Value) {
        let page: Page<Post> = decode_page(body, POSTS_KEY);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_empty_string_cursor_is_kept() {
        let body = json!({"posts": [], "next_cursor": ""});

        let page: Page<Post> = decode_page(body, POSTS_KEY);

        // Present-but-empty is not the end-of-data signal
        assert_eq!(page.next_cursor, Some(Cursor::empty()));
    }

    #[rstest]
    #[case(json!({"next_cursor": "abc"}))] // items key missing
    #[case(json!({"posts": "not-an-array", "next_cursor": "abc"}))]
    #[case(json!("totally wrong"))]
    fn test_shape_mismatch_decodes_as_end_of_data(#[case] body: Value) {
        let page: Page<Post> = decode_page(body, POSTS_KEY);

        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_malformed_item_is_dropped_not_fatal() {
        let body = json!({
            "posts": [post_value("p1"), {"garbage": true}, post_value("p2")],
            "next_cursor": "c1",
        });

        let page: Page<Post> = decode_page(body, POSTS_KEY);

        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert!(page.has_more());
    }

    #[test]
    fn test_unexpected_cursor_shape_ends_pagination() {
        let body = json!({"posts": [], "next_cursor": {"nested": true}});

        let page: Page<Post> = decode_page(body, POSTS_KEY);

        assert_eq!(page.next_cursor, None);
    }
}
