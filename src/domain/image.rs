// SPDX-License-Identifier: MPL-2.0
//! Images shown by one lightbox session.

use crate::domain::node::NodeId;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the `name=<token>` size parameter of a media URL query string.
static SIZE_PARAM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([?&])name=(\w+)").ok());

/// Returns `url` with its size token replaced by `token`.
///
/// Only the first `name=` parameter is rewritten. URLs without one are
/// returned unchanged, so applying the derivation twice yields the same URL.
#[must_use]
pub fn derive_high_res_url(url: &str, token: &str) -> String {
    match SIZE_PARAM.as_ref() {
        Some(re) => re
            .replacen(url, 1, |caps: &regex::Captures<'_>| {
                format!("{}name={token}", &caps[1])
            })
            .into_owned(),
        None => url.to_string(),
    }
}

/// Extracts the size token of a media URL, if it has one.
#[must_use]
pub fn size_token(url: &str) -> Option<&str> {
    SIZE_PARAM
        .as_ref()?
        .captures(url)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// One image of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// URL as found in the page. Unique within an [`ImageList`].
    pub source_url: String,
    /// `source_url` rewritten to the largest variant.
    pub high_res_url: String,
    /// The `<img>` the entry was collected from (close animation target).
    pub origin: NodeId,
    /// Enclosing post, if the image could be attributed to one.
    pub post: Option<NodeId>,
}

impl ImageEntry {
    #[must_use]
    pub fn new(source_url: impl Into<String>, token: &str, origin: NodeId, post: Option<NodeId>) -> Self {
        let source_url = source_url.into();
        let high_res_url = derive_high_res_url(&source_url, token);
        Self {
            source_url,
            high_res_url,
            origin,
            post,
        }
    }
}

/// Ordered, de-duplicated images of a session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageList {
    entries: Vec<ImageEntry>,
}

impl ImageList {
    /// Creates a list holding a single entry.
    #[must_use]
    pub fn single(entry: ImageEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Builds a list from entries in document order, dropping duplicate URLs.
    ///
    /// Returns `None` when `entries` is empty.
    pub fn from_entries(entries: impl IntoIterator<Item = ImageEntry>) -> Option<Self> {
        let mut iter = entries.into_iter();
        let mut list = Self::single(iter.next()?);
        for entry in iter {
            list.push(entry);
        }
        Some(list)
    }

    /// Appends `entry` unless its URL is already present (first occurrence wins).
    pub fn push(&mut self, entry: ImageEntry) -> bool {
        if self.position_of(&entry.source_url).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Index of the entry whose source URL equals `url`.
    #[must_use]
    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.source_url == url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a list holds at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ImageEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a ImageList {
    type Item = &'a ImageEntry;
    type IntoIter = std::slice::Iter<'a, ImageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "https://pbs.twimg.com/media/AbC123?format=jpg&name=small";

    fn entry(url: &str, id: u64) -> ImageEntry {
        ImageEntry::new(url, "large", NodeId::new(id), None)
    }

    #[test]
    fn high_res_rewrites_size_token() {
        let high = derive_high_res_url(SMALL, "large");
        assert_eq!(high, "https://pbs.twimg.com/media/AbC123?format=jpg&name=large");
        assert_eq!(size_token(&high), Some("large"));
    }

    #[test]
    fn high_res_derivation_is_idempotent() {
        let once = derive_high_res_url(SMALL, "large");
        let twice = derive_high_res_url(&once, "large");
        assert_eq!(once, twice);
    }

    #[test]
    fn url_without_size_param_is_unchanged() {
        let url = "https://pbs.twimg.com/media/AbC123.jpg";
        assert_eq!(derive_high_res_url(url, "large"), url);
        assert_eq!(size_token(url), None);
    }

    #[test]
    fn only_the_name_parameter_is_rewritten() {
        let url = "https://pbs.twimg.com/media/X?filename=a&name=900x900";
        assert_eq!(
            derive_high_res_url(url, "orig"),
            "https://pbs.twimg.com/media/X?filename=a&name=orig"
        );
    }

    #[test]
    fn duplicate_urls_are_rejected() {
        let mut list = ImageList::single(entry(SMALL, 1));
        assert!(!list.push(entry(SMALL, 2)));
        assert!(list.push(entry("https://pbs.twimg.com/media/Other?name=small", 3)));
        assert_eq!(list.len(), 2);
        // First occurrence wins
        assert_eq!(list.get(0).map(|e| e.origin), Some(NodeId::new(1)));
    }

    #[test]
    fn from_entries_requires_one_entry() {
        assert!(ImageList::from_entries(Vec::new()).is_none());
        let list = ImageList::from_entries(vec![entry(SMALL, 1), entry(SMALL, 2)]).expect("non-empty");
        assert_eq!(list.len(), 1);
        assert_eq!(list.position_of(SMALL), Some(0));
    }
}
