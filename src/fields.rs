//! Line Tokenizer
//!
//! Splits one hosts-file line into whitespace-delimited fields:
//! ```text
//! "127.0.0.1   localhost\tlocal   # loopback"
//!  └─ 0 ────┘  └─ 1 ───┘ └─ 2 ┘   └─ 3 ────┘ ...
//! ```
//!
//! Scanning uses a 256-entry ASCII table and only drops to Unicode
//! whitespace classification once a byte >= 0x80 shows up, so plain
//! blocklists never pay for UTF-8 decoding.

use core::iter::FusedIterator;

/// Comment marker. A field starting with it ends the line.
pub const COMMENT: u8 = b'#';

/// ASCII whitespace lookup: `\t \n \v \f \r` and space.
const ASCII_SPACE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'\t' as usize] = true;
    table[b'\n' as usize] = true;
    table[0x0b] = true; // \v
    table[0x0c] = true; // \f
    table[b'\r' as usize] = true;
    table[b' ' as usize] = true;
    table
};

#[inline]
fn is_ascii_space(b: u8) -> bool {
    ASCII_SPACE[b as usize]
}

/// Find the next separator in `p`, returning `(offset, width)`.
///
/// Width is 1 for ASCII whitespace and the UTF-8 length for Unicode
/// separators (e.g. 2 for U+00A0, 3 for U+3000).
fn find_space(p: &[u8]) -> Option<(usize, usize)> {
    for (i, &b) in p.iter().enumerate() {
        if !b.is_ascii() {
            return find_unicode_space(&p[i..]).map(|(j, width)| (i + j, width));
        }
        if is_ascii_space(b) {
            return Some((i, 1));
        }
    }
    None
}

/// Unicode fallback. Invalid UTF-8 sequences are never whitespace.
fn find_unicode_space(p: &[u8]) -> Option<(usize, usize)> {
    let mut offset = 0;
    for chunk in p.utf8_chunks() {
        let valid = chunk.valid();
        if let Some((i, c)) = valid.char_indices().find(|(_, c)| c.is_whitespace()) {
            return Some((offset + i, c.len_utf8()));
        }
        offset += valid.len() + chunk.invalid().len();
    }
    None
}

/// Lazy iterator over the fields of one line.
///
/// Runs of separators collapse, so empty fields are never produced.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        while !self.rest.is_empty() {
            match find_space(self.rest) {
                None => {
                    let field = self.rest;
                    self.rest = &[];
                    return Some(field);
                }
                Some((0, width)) => self.rest = &self.rest[width..],
                Some((idx, width)) => {
                    let field = &self.rest[..idx];
                    self.rest = &self.rest[idx + width..];
                    return Some(field);
                }
            }
        }
        None
    }
}

impl FusedIterator for Fields<'_> {}

/// Split `line` into whitespace-delimited fields.
pub fn fields(line: &[u8]) -> Fields<'_> {
    Fields { rest: line }
}

/// Callback form of [`fields`].
///
/// `f` receives the field index and bytes; returning `false` stops the
/// enumeration, so no further fields are scanned.
pub fn for_each_field<F>(line: &[u8], mut f: F)
where
    F: FnMut(usize, &[u8]) -> bool,
{
    for (i, field) in fields(line).enumerate() {
        if !f(i, field) {
            return;
        }
    }
}

/// True if the field starts a trailing comment.
#[inline]
pub fn is_comment(field: &[u8]) -> bool {
    field.first() == Some(&COMMENT)
}

/// Strip surrounding whitespace from a raw line.
///
/// ASCII is trimmed first; Unicode whitespace is only decoded at an edge
/// that still holds a non-ASCII byte. Invalid UTF-8 is never whitespace,
/// and only stops trimming at the edge where it sits.
pub fn trim(line: &[u8]) -> &[u8] {
    trim_end(trim_start(line))
}

fn trim_start(mut p: &[u8]) -> &[u8] {
    loop {
        p = p.trim_ascii_start();
        if !p.first().is_some_and(|b| !b.is_ascii()) {
            return p;
        }
        match p.utf8_chunks().next().and_then(|chunk| chunk.valid().chars().next()) {
            Some(c) if c.is_whitespace() => p = &p[c.len_utf8()..],
            _ => return p,
        }
    }
}

fn trim_end(mut p: &[u8]) -> &[u8] {
    loop {
        p = p.trim_ascii_end();
        if !p.last().is_some_and(|b| !b.is_ascii()) {
            return p;
        }
        let Some(chunk) = p.utf8_chunks().last() else {
            return p;
        };
        if !chunk.invalid().is_empty() {
            return p;
        }
        match chunk.valid().chars().next_back() {
            Some(c) if c.is_whitespace() => p = &p[..p.len() - c.len_utf8()],
            _ => return p,
        }
    }
}
