use serde::{Deserialize, Serialize};

/// Opaque continuation token returned by a paginated endpoint and passed back
/// verbatim to fetch the next page. The empty cursor means "first page" on
/// requests; on responses an empty-but-present cursor is retained (retry-able),
/// while an absent or null cursor is the sole end-of-data signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The first-page cursor.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<u64> for Cursor {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A single page request. `limit` is always at least 1 and the empty cursor
/// requests the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub cursor: Cursor,
}

impl PageRequest {
    pub fn new(limit: u32, cursor: Cursor) -> Self {
        Self {
            limit: limit.max(1),
            cursor,
        }
    }

    pub fn first_page(limit: u32) -> Self {
        Self::new(limit, Cursor::empty())
    }
}

/// A decoded page of entities. `next_cursor == None` means end of data;
/// `Some(cursor)` means more may be available, even when the cursor is the
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// A terminal page with no items and no continuation.
    pub fn end() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}
