//! Parse failure: the first stream read error plus everything parsed so far.

use core::fmt;
use std::error::Error;
use std::io;

use crate::table::HostsTable;

/// A stream failed to read. Lines read before the failure are kept.
pub struct ParseError {
    partial: HostsTable,
    stream: usize,
    source: io::Error,
}

impl ParseError {
    pub(crate) fn new(partial: HostsTable, stream: usize, source: io::Error) -> Self {
        Self {
            partial,
            stream,
            source,
        }
    }

    /// Table built from all lines read before the failure.
    pub fn partial(&self) -> &HostsTable {
        &self.partial
    }

    /// Zero-based index of the stream that failed.
    pub fn stream(&self) -> usize {
        self.stream
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    pub fn into_parts(self) -> (HostsTable, io::Error) {
        (self.partial, self.source)
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseError")
            .field("stream", &self.stream)
            .field("partial_entries", &self.partial.len())
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read hosts stream {}: {}", self.stream, self.source)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> Self {
        err.source
    }
}
