//! Hosts Table — lowercase domain → [`AddressList`]

use alloc::string::String;
use std::collections::hash_map::{self, Entry};
use std::collections::HashMap;

use crate::list::AddressList;
use crate::normalize;

/// Result of a parse: every domain seen, keyed in lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsTable {
    entries: HashMap<String, AddressList>,
}

impl HostsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table with room for `capacity` domains.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Bind `domain` (already lowercase) to `addrs`.
    ///
    /// New domains take `addrs` as is, keeping it shared. Known domains
    /// merge it in (see [`AddressList::merge`]).
    pub(crate) fn bind(&mut self, domain: String, addrs: &AddressList) {
        match self.entries.entry(domain) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(addrs),
            Entry::Vacant(entry) => {
                entry.insert(addrs.clone());
            }
        }
    }

    /// Exact key lookup. `domain` must already be lowercase.
    pub fn get(&self, domain: &str) -> Option<&AddressList> {
        self.entries.get(domain)
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, domain: &str) -> Option<&AddressList> {
        self.entries.get(&normalize::to_lower(domain.as_bytes()))
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.lookup(domain).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, AddressList> {
        self.entries.iter()
    }

    pub fn domains(&self) -> hash_map::Keys<'_, String, AddressList> {
        self.entries.keys()
    }

    pub fn into_map(self) -> HashMap<String, AddressList> {
        self.entries
    }
}

impl IntoIterator for HostsTable {
    type Item = (String, AddressList);
    type IntoIter = hash_map::IntoIter<String, AddressList>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a HostsTable {
    type Item = (&'a String, &'a AddressList);
    type IntoIter = hash_map::Iter<'a, String, AddressList>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
