//! The post record and the request shapes that create, patch, query and
//! reorder it.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// A stored post. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(id: u64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id, title: title.into(), content: content.into() }
    }
}

/// Body of a create or update request.
///
/// Both fields are optional on the wire. Whether they are required is the
/// store's call, not the decoder's.
#[derive(Clone, Debug, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostInput {
    pub fn new(title: Option<&str>, content: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_owned),
            content: content.map(str::to_owned),
        }
    }

    /// Decodes a request body.
    ///
    /// Only a body that is not JSON at all is a [`StoreError::Parse`]. A
    /// `title` or `content` that is not a string counts as absent and is left
    /// to field validation, as is every field of a non-object body.
    pub fn from_json(body: &[u8]) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| StoreError::Parse)?;
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_owned);
        Ok(Self { title: field("title"), content: field("content") })
    }

    /// `title`, unless absent or empty.
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// `content`, unless absent or empty.
    pub fn content(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }
}

/// `GET /api/posts` query. A key that is present with an empty value is
/// still `Some("")`.
#[derive(Clone, Debug, Default)]
pub struct ListParams {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// `GET /api/posts/search` query.
#[derive(Clone, Debug, Default)]
pub struct SearchParams {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl SearchParams {
    /// The lowercased title needle, if one was given.
    pub(crate) fn title_needle(&self) -> Option<String> {
        non_empty(self.title.as_deref()).map(str::to_lowercase)
    }

    /// The lowercased content needle, if one was given.
    pub(crate) fn content_needle(&self) -> Option<String> {
        non_empty(self.content.as_deref()).map(str::to_lowercase)
    }
}

/// A field posts can be ordered by. Parsing is case-sensitive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Title,
    Content,
}

impl SortField {
    pub fn key<'a>(&self, post: &'a Post) -> &'a str {
        match self {
            Self::Title   => &post.title,
            Self::Content => &post.content,
        }
    }
}

impl FromStr for SortField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title"   => Ok(Self::Title),
            "content" => Ok(Self::Content),
            other     => Err(StoreError::InvalidSortField(other.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any ASCII case is descending. Everything else, the empty
    /// string included, is ascending.
    pub fn from_param(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") { Self::Desc } else { Self::Asc }
    }

    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Asc  => ord,
            Self::Desc => ord.reverse(),
        }
    }
}

/// Parses a path segment into a post id.
///
/// Anything that is not an integer (optional sign, then digits, surrounding
/// whitespace allowed) is [`StoreError::InvalidId`]. An integer no post can
/// carry, negative or past `u64::MAX`, is [`StoreError::NotFound`].
pub fn parse_id(raw: &str) -> Result<u64, StoreError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::InvalidId);
    }
    raw.parse().map_err(|_| StoreError::NotFound(raw.to_owned()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
