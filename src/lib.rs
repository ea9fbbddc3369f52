//! # hostsmap — Hosts File & Blocklist Parser
//!
//! Merges any number of hosts-format streams into one table of
//! lowercase domain → ordered IP address list.
//!
//! ## Architecture
//!
//! ```text
//! [Read] → line → trim → fields ──► field 0 ──► AddressCache ── hit/decoded ──► address line
//!                                                    │
//!                                                    └── not an IP ──► domain list (absent)
//!                                     │
//!                                     └── domains → to_lower → HostsTable::bind (share / copy-on-write)
//! ```
//!
//! ## Components
//!
//! - **fields**: whitespace tokenizer, ASCII table + Unicode fallback
//! - **normalize**: domain lowercasing, ASCII fast path + Unicode fallback
//! - **cache**: per-parse address interning (`0.0.0.0` lines share one list)
//! - **list**: shared, copy-on-write, duplicate-free address list
//! - **table**: domain → address list map
//! - **parser**: line/stream aggregation, `parse`, `HostsBuilder`
//! - **error**: read failure carrying the partial table
//!
//! ## Example
//!
//! ```
//! let input = "127.0.0.1 domain.com domain2.com\n::1 domain.com\nAds.Example.com";
//! let table = hostsmap::parse([input.as_bytes()]).unwrap();
//!
//! assert_eq!(table.get("domain.com").unwrap().len(), 2);
//! assert!(table.get("ads.example.com").unwrap().is_absent());
//! ```

extern crate alloc;

pub mod cache;
pub mod error;
pub mod fields;
pub mod list;
pub mod normalize;
pub mod parser;
pub mod table;

// Re-exports
pub use cache::AddressCache;
pub use error::ParseError;
pub use list::{AddressList, Family};
pub use parser::{load_from_files, parse, parse_with_capacity, HostsBuilder};
pub use table::HostsTable;

/// hostsmap version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
