// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC 8 hyperlink table.
//!
//! `OSC 8 ; params ; uri ST` opens a hyperlink scope: every cell written
//! until the closing `OSC 8 ; ; ST` is stamped with the scope's id. The
//! buffer owns one [`HyperlinkTable`] mapping ids back to URIs; ids are
//! monotonic 16-bit values and persist until the buffer is cleared.

use std::collections::HashMap;

/// Identifier stamped on cells written inside a hyperlink scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HyperlinkId(pub u16);

/// One registered hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub uri: String,
    /// Explicit `id=` parameter from the OSC 8 sequence, if any. Scopes
    /// sharing an explicit id reuse the same [`HyperlinkId`].
    pub params_id: Option<String>,
}

/// Registry of hyperlinks seen by one screen buffer.
#[derive(Debug, Default)]
pub struct HyperlinkTable {
    links: HashMap<HyperlinkId, Hyperlink>,
    next_id: u16,
}

impl HyperlinkTable {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register a hyperlink and return its id.
    ///
    /// If `params_id` matches an earlier registration with the same URI, the
    /// earlier id is reused so split scopes resolve to one logical link.
    pub fn add(&mut self, uri: &str, params_id: Option<&str>) -> HyperlinkId {
        if let Some(wanted) = params_id {
            let existing = self.links.iter().find(|(_, link)| {
                link.params_id.as_deref() == Some(wanted) && link.uri == uri
            });
            if let Some((&id, _)) = existing {
                return id;
            }
        }

        let id = HyperlinkId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.links.insert(
            id,
            Hyperlink {
                uri: uri.to_string(),
                params_id: params_id.map(str::to_string),
            },
        );
        id
    }

    /// Resolve an id back to its hyperlink.
    #[must_use]
    pub fn get(&self, id: HyperlinkId) -> Option<&Hyperlink> { self.links.get(&id) }

    /// Resolve an id to its URI.
    #[must_use]
    pub fn uri(&self, id: HyperlinkId) -> Option<&str> {
        self.links.get(&id).map(|link| link.uri.as_str())
    }

    /// Number of registered links.
    #[must_use]
    pub fn len(&self) -> usize { self.links.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.links.is_empty() }

    /// Drop all registrations (buffer clear).
    pub fn clear(&mut self) { self.links.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut table = HyperlinkTable::new();
        let a = table.add("https://example.com", None);
        let b = table.add("https://example.org", None);
        assert_eq!(a, HyperlinkId(0));
        assert_eq!(b, HyperlinkId(1));
        assert_eq!(table.uri(a), Some("https://example.com"));
    }

    #[test]
    fn test_explicit_id_reuse() {
        let mut table = HyperlinkTable::new();
        let a = table.add("https://example.com", Some("doc1"));
        let b = table.add("https://example.com", Some("doc1"));
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);

        // Same id param, different uri: distinct link.
        let c = table.add("https://other.example", Some("doc1"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_clear_empties_table() {
        let mut table = HyperlinkTable::new();
        let id = table.add("https://example.com", None);
        table.clear();
        assert!(table.get(id).is_none());
        assert!(table.is_empty());
    }
}
