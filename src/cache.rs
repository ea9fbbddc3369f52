//! Address Resolver with per-parse cache
//!
//! The first field of a line is tried as an IP address. Successful
//! decodes are interned by their exact text, so every `0.0.0.0 <domain>`
//! line of a blocklist hands out the same [`AddressList`] buffer.
//!
//! A cache lives for exactly one parse; it is owned by the
//! [`HostsBuilder`](crate::HostsBuilder) and never global.

use alloc::string::{String, ToString};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use log::trace;

use crate::list::AddressList;

/// Literals bound so often they are seeded up front.
const SEED: [(&str, IpAddr); 4] = [
    ("0.0.0.0", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
    ("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST)),
    ("::", IpAddr::V6(Ipv6Addr::UNSPECIFIED)),
    ("::1", IpAddr::V6(Ipv6Addr::LOCALHOST)),
];

/// Text → decoded address list. Negative results are never stored.
#[derive(Debug)]
pub struct AddressCache {
    entries: HashMap<String, AddressList>,
}

impl AddressCache {
    /// Cache seeded with `0.0.0.0`, `127.0.0.1`, `::` and `::1`.
    pub fn new() -> Self {
        let entries = SEED
            .iter()
            .map(|(text, addr)| (text.to_string(), AddressList::single(*addr)))
            .collect();
        Self { entries }
    }

    /// Resolve a field as an address.
    ///
    /// Returns the shared list on a hit, decodes and interns on a miss,
    /// and returns `None` for anything that is not an IP literal.
    pub fn resolve(&mut self, field: &[u8]) -> Option<AddressList> {
        let text = core::str::from_utf8(field).ok()?;
        if let Some(list) = self.entries.get(text) {
            return Some(list.clone());
        }

        let addr: IpAddr = text.parse().ok()?;
        trace!("address cache miss: {:?} -> {}", text, addr);
        let list = AddressList::single(addr);
        self.entries.insert(text.to_string(), list.clone());
        Some(list)
    }

    /// Number of interned literals, seeds included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AddressCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_hits() {
        let mut cache = AddressCache::new();
        assert_eq!(cache.len(), 4);
        for (text, addr) in SEED {
            let list = cache.resolve(text.as_bytes()).unwrap();
            assert_eq!(list.as_slice(), &[addr]);
        }
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_same_text_shares_list() {
        let mut cache = AddressCache::new();
        let a = cache.resolve(b"0.0.0.0").unwrap();
        let b = cache.resolve(b"0.0.0.0").unwrap();
        assert!(a.is_shared_with(&b));

        let c = cache.resolve(b"192.168.1.1").unwrap();
        let d = cache.resolve(b"192.168.1.1").unwrap();
        assert!(c.is_shared_with(&d));
        assert!(!a.is_shared_with(&c));
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_domains_not_cached() {
        let mut cache = AddressCache::new();
        assert!(cache.resolve(b"example.com").is_none());
        assert!(cache.resolve(b"example.com").is_none());
        assert!(cache.resolve(b"fe80::1%lo0").is_none());
        assert!(cache.resolve(b"\xff\xfe").is_none());
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_equivalent_spellings_decode_equal() {
        let mut cache = AddressCache::new();
        let a = cache.resolve(b"::ffff:127.0.0.1").unwrap();
        let b = cache.resolve(b"127.0.0.1").unwrap();
        assert_eq!(a, b);
        // Different text, separate interned lists.
        assert!(!a.is_shared_with(&b));
    }

    #[test]
    fn test_caches_are_independent() {
        let mut one = AddressCache::new();
        let mut two = AddressCache::new();
        let a = one.resolve(b"0.0.0.0").unwrap();
        let b = two.resolve(b"0.0.0.0").unwrap();
        assert!(!a.is_shared_with(&b));
    }
}
