//! Address List — Shared Copy-on-Write Address Sequence
//!
//! Every domain in a [`HostsTable`](crate::HostsTable) maps to an
//! `AddressList`. Blocklists bind tens of thousands of domains to the same
//! literal (`0.0.0.0`), so lists are reference counted and handed out by
//! the resolver cache:
//!
//! ```text
//! "0.0.0.0"  ──► Arc[0.0.0.0] ◄── ads.example.com
//!                     ▲   ▲────── tracker.example.com
//!                     └────────── doubleclick.net
//! ```
//!
//! A list is only copied when one entry needs to append an address while
//! others still reference it (`Arc::make_mut`). Absent lists (domain-list
//! entries) carry no allocation at all.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::slice;
use std::net::IpAddr;

/// Address family used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Family of `addr`. IPv4-mapped IPv6 (`::ffff:a.b.c.d`) counts as IPv4.
    pub fn of(addr: &IpAddr) -> Self {
        match addr.to_canonical() {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

/// Ordered, shareable, duplicate-free list of IP addresses.
///
/// `Clone` is cheap and shares the underlying buffer; use
/// [`deep_clone`](Self::deep_clone) for an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    addrs: Option<Arc<Vec<IpAddr>>>,
}

impl AddressList {
    /// List with no address association (domain-list entry).
    pub fn absent() -> Self {
        Self { addrs: None }
    }

    /// Single-address list. Mapped IPv6 is stored in its IPv4 form.
    pub fn single(addr: IpAddr) -> Self {
        Self {
            addrs: Some(Arc::new(alloc::vec![addr.to_canonical()])),
        }
    }

    /// True for domain-list entries, which never had an address.
    ///
    /// Differs from [`is_empty`](Self::is_empty): a resolved list with zero
    /// addresses is empty but not absent.
    pub fn is_absent(&self) -> bool {
        self.addrs.is_none()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn as_slice(&self) -> &[IpAddr] {
        match &self.addrs {
            Some(addrs) => addrs.as_slice(),
            None => &[],
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, IpAddr> {
        self.as_slice().iter()
    }

    pub fn first(&self) -> Option<&IpAddr> {
        self.as_slice().first()
    }

    /// Whether `addr` is present, comparing decoded values.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        let addr = addr.to_canonical();
        self.iter().any(|x| x.to_canonical() == addr)
    }

    /// Whether both lists point to the same shared buffer.
    pub fn is_shared_with(&self, other: &AddressList) -> bool {
        match (&self.addrs, &other.addrs) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Independent copy with the same addresses.
    pub fn deep_clone(&self) -> Self {
        Self {
            addrs: self.addrs.as_ref().map(|addrs| Arc::new(Vec::clone(addrs))),
        }
    }

    /// Append `addr` unless already present. Returns `true` if appended.
    ///
    /// Copies the buffer first when other lists share it.
    pub fn insert(&mut self, addr: IpAddr) -> bool {
        if self.contains(&addr) {
            return false;
        }
        let addr = addr.to_canonical();
        match &mut self.addrs {
            Some(addrs) => Arc::make_mut(addrs).push(addr),
            None => self.addrs = Some(Arc::new(alloc::vec![addr])),
        }
        true
    }

    /// Merge the addresses of `other` into this list.
    ///
    /// - `other` absent: no-op, an existing list is never downgraded.
    /// - `self` absent: adopt `other`, sharing its buffer.
    /// - otherwise: append each address not yet contained.
    pub fn merge(&mut self, other: &AddressList) {
        if other.is_absent() {
            return;
        }
        if self.is_absent() {
            *self = other.clone();
            return;
        }
        for addr in other.iter() {
            self.insert(*addr);
        }
    }

    /// Visit addresses of `family` in order until `visit` returns `false`.
    pub fn filter_family<F>(&self, family: Family, mut visit: F)
    where
        F: FnMut(IpAddr) -> bool,
    {
        for addr in self.iter() {
            if Family::of(addr) == family && !visit(*addr) {
                return;
            }
        }
    }

    /// Visit IPv4 addresses (including IPv4-mapped IPv6).
    pub fn filter_ipv4<F>(&self, visit: F)
    where
        F: FnMut(IpAddr) -> bool,
    {
        self.filter_family(Family::V4, visit)
    }

    /// Visit IPv6 addresses.
    pub fn filter_ipv6<F>(&self, visit: F)
    where
        F: FnMut(IpAddr) -> bool,
    {
        self.filter_family(Family::V6, visit)
    }

    pub fn ipv4(&self) -> impl Iterator<Item = &IpAddr> + '_ {
        self.iter().filter(|a| Family::of(a) == Family::V4)
    }

    pub fn ipv6(&self) -> impl Iterator<Item = &IpAddr> + '_ {
        self.iter().filter(|a| Family::of(a) == Family::V6)
    }
}

impl FromIterator<IpAddr> for AddressList {
    /// Collect into an owned list, dropping duplicates.
    fn from_iter<I: IntoIterator<Item = IpAddr>>(iter: I) -> Self {
        let mut addrs: Vec<IpAddr> = Vec::new();
        for addr in iter {
            let addr = addr.to_canonical();
            if !addrs.contains(&addr) {
                addrs.push(addr);
            }
        }
        Self {
            addrs: Some(Arc::new(addrs)),
        }
    }
}

impl<'a> IntoIterator for &'a AddressList {
    type Item = &'a IpAddr;
    type IntoIter = slice::Iter<'a, IpAddr>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn sample() -> AddressList {
        [
            "1.1.1.1",
            "2606:4700:4700::1111",
            "1.0.0.1",
            "2606:4700:4700::1001",
        ]
        .into_iter()
        .map(ip)
        .collect()
    }

    #[test]
    fn test_absent_vs_empty() {
        let absent = AddressList::absent();
        assert!(absent.is_absent());
        assert!(absent.is_empty());
        assert_eq!(absent.len(), 0);

        let empty: AddressList = core::iter::empty().collect();
        assert!(!empty.is_absent());
        assert!(empty.is_empty());
        assert_ne!(absent, empty);
    }

    #[test]
    fn test_filter_empty_list() {
        let list = AddressList::absent();
        list.filter_ipv4(|_| panic!("absent list has no IPv4"));
        list.filter_ipv6(|_| panic!("absent list has no IPv6"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let list = sample();

        let mut v4 = Vec::new();
        list.filter_ipv4(|a| {
            v4.push(a);
            true
        });
        assert_eq!(v4, vec![ip("1.1.1.1"), ip("1.0.0.1")]);

        let mut v6 = Vec::new();
        list.filter_ipv6(|a| {
            v6.push(a);
            true
        });
        assert_eq!(v6, vec![ip("2606:4700:4700::1111"), ip("2606:4700:4700::1001")]);

        assert_eq!(list.ipv4().count(), 2);
        assert_eq!(list.ipv6().count(), 2);
    }

    #[test]
    fn test_filter_stops_early() {
        let list = sample();
        let mut visited = 0;
        list.filter_ipv4(|_| {
            visited += 1;
            false
        });
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_mapped_ipv6_is_ipv4() {
        let mapped = IpAddr::V6(Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped());
        assert_eq!(Family::of(&mapped), Family::V4);
        assert_eq!(Family::of(&IpAddr::V6(Ipv6Addr::LOCALHOST)), Family::V6);

        let list = AddressList::single(mapped);
        assert_eq!(list.first(), Some(&ip("10.0.0.1")));
        assert!(list.contains(&mapped));
        assert!(list.contains(&ip("10.0.0.1")));
    }

    #[test]
    fn test_insert_dedup() {
        let mut list = AddressList::single(ip("127.0.0.1"));
        assert!(!list.insert(ip("127.0.0.1")));
        assert!(!list.insert(ip("::ffff:127.0.0.1")));
        assert!(list.insert(ip("::1")));
        assert!(!list.insert(ip("0:0::1")));
        assert_eq!(list.as_slice(), &[ip("127.0.0.1"), ip("::1")]);
    }

    #[test]
    fn test_insert_copies_shared_buffer() {
        let shared = AddressList::single(ip("0.0.0.0"));
        let mut a = shared.clone();
        let b = shared.clone();
        assert!(a.is_shared_with(&b));

        a.insert(ip("::"));
        assert!(!a.is_shared_with(&b));
        assert!(b.is_shared_with(&shared));
        assert_eq!(shared.as_slice(), &[ip("0.0.0.0")]);
        assert_eq!(a.as_slice(), &[ip("0.0.0.0"), ip("::")]);
    }

    #[test]
    fn test_deep_clone_breaks_sharing() {
        let list = AddressList::single(ip("1.1.1.1"));
        let copy = list.deep_clone();
        assert_eq!(list, copy);
        assert!(!list.is_shared_with(&copy));
        assert!(AddressList::absent().deep_clone().is_absent());
    }

    #[test]
    fn test_merge_rules() {
        let shared = AddressList::single(ip("127.0.0.1"));

        let mut entry = AddressList::absent();
        entry.merge(&shared);
        assert!(entry.is_shared_with(&shared));

        entry.merge(&AddressList::absent());
        assert_eq!(entry.as_slice(), &[ip("127.0.0.1")]);

        entry.merge(&shared);
        assert!(entry.is_shared_with(&shared));

        entry.merge(&AddressList::single(ip("::1")));
        assert_eq!(entry.as_slice(), &[ip("127.0.0.1"), ip("::1")]);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_absent_never_shared() {
        assert!(!AddressList::absent().is_shared_with(&AddressList::absent()));
    }
}
