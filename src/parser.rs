//! Hosts Parser — address lines and domain lists
//!
//! Parses the traditional hosts grammar used by `/etc/hosts` and by
//! StevenBlack-style blocklists:
//! ```text
//! 127.0.0.1  localhost loopback   # address line
//! ::1        localhost
//! 0.0.0.0    ads.example.com
//! tracker.example.com             # domain list, no address
//! ```
//!
//! A line whose first field decodes as an IP address binds every following
//! field to it. Otherwise every field, the first included, is a domain
//! with an absent address list. A field starting with `#` ends the line.
//!
//! Streams are read in order; the first read failure stops the parse and
//! is returned together with the table built so far.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use alloc::vec::Vec;
use log::{debug, warn};

use crate::cache::AddressCache;
use crate::error::ParseError;
use crate::fields::{self, COMMENT};
use crate::list::AddressList;
use crate::normalize;
use crate::table::HostsTable;

/// Initial line buffer size; most hosts lines are far shorter.
const LINE_CAPACITY: usize = 256;

/// Incremental table builder.
///
/// Owns the table and the address cache for one parse. Feed it lines or
/// whole readers, then call [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct HostsBuilder {
    table: HostsTable,
    cache: AddressCache,
    lines: u64,
}

impl HostsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose table starts with room for `capacity` domains.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HostsTable::with_capacity(capacity),
            cache: AddressCache::new(),
            lines: 0,
        }
    }

    /// Parse one raw line. Surrounding whitespace is ignored; blank and
    /// comment lines contribute nothing.
    pub fn add_line(&mut self, line: &[u8]) {
        let line = fields::trim(line);
        if line.is_empty() || line[0] == COMMENT {
            return;
        }
        self.lines += 1;

        let mut tokens = fields::fields(line);
        let Some(first) = tokens.next() else {
            return;
        };

        let addrs = match self.cache.resolve(first) {
            Some(addrs) => addrs,
            None => {
                let absent = AddressList::absent();
                self.bind(first, &absent);
                absent
            }
        };

        for field in tokens.take_while(|f| !fields::is_comment(f)) {
            self.bind(field, &addrs);
        }
    }

    fn bind(&mut self, field: &[u8], addrs: &AddressList) {
        self.table.bind(normalize::to_lower(field), addrs);
    }

    /// Read `reader` to the end, line by line.
    ///
    /// On error, lines already read stay in the table; a partially read
    /// trailing line is dropped.
    pub fn read_from<R: Read>(&mut self, reader: R) -> io::Result<()> {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::with_capacity(LINE_CAPACITY);
        let start = self.lines;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            self.add_line(&buf);
        }
        debug!(
            "hosts stream done: {} lines, {} domains, {} cached addresses",
            self.lines - start,
            self.table.len(),
            self.cache.len()
        );
        Ok(())
    }

    /// Number of non-blank, non-comment lines parsed so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn table(&self) -> &HostsTable {
        &self.table
    }

    /// Drop the cache and return the table.
    pub fn finish(self) -> HostsTable {
        self.table
    }
}

/// Parse hosts streams into one table.
///
/// See [`parse_with_capacity`].
pub fn parse<I, R>(readers: I) -> Result<HostsTable, ParseError>
where
    I: IntoIterator<Item = R>,
    R: Read,
{
    parse_with_capacity(0, readers)
}

/// Parse hosts streams into one table, pre-sizing it for `capacity`
/// domains.
///
/// Domains are lowercased; addresses keep their file order. Domains bound
/// to the same address literal share one list until one of them gains a
/// second address. The first read error aborts the parse; the error
/// carries the table built up to that point.
pub fn parse_with_capacity<I, R>(capacity: usize, readers: I) -> Result<HostsTable, ParseError>
where
    I: IntoIterator<Item = R>,
    R: Read,
{
    let mut builder = HostsBuilder::with_capacity(capacity);
    for (stream, reader) in readers.into_iter().enumerate() {
        if let Err(e) = builder.read_from(reader) {
            warn!("hosts stream {} failed after {} lines: {}", stream, builder.lines(), e);
            return Err(ParseError::new(builder.finish(), stream, e));
        }
    }
    Ok(builder.finish())
}

/// Open and parse hosts files in order.
///
/// All files are opened before any is read, so a missing file fails fast.
pub fn load_from_files<P: AsRef<Path>>(paths: &[P]) -> io::Result<HostsTable> {
    let files = paths
        .iter()
        .map(File::open)
        .collect::<io::Result<Vec<_>>>()?;
    Ok(parse(files)?)
}
