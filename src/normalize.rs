//! Domain Normalizer
//!
//! Domains are case-insensitive; table keys are always lowercase.

use alloc::string::String;

/// Lowercase a domain field.
///
/// ASCII input is folded with a branchless byte map. The first byte
/// outside 7-bit ASCII switches the whole field to per-char Unicode
/// lowercase mapping ("GĘŚ" → "gęś"). Invalid UTF-8 becomes U+FFFD.
pub fn to_lower(field: &[u8]) -> String {
    let mut out = String::with_capacity(field.len());
    for &b in field {
        if !b.is_ascii() {
            return String::from_utf8_lossy(field)
                .chars()
                .map(simple_lower)
                .collect();
        }
        let is_upper = b.wrapping_sub(b'A') < 26;
        let offset = (is_upper as u8) << 5; // 32 if uppercase, 0 otherwise
        out.push(char::from(b + offset));
    }
    out
}

/// One-to-one lowercase mapping of a single char.
///
/// `char::to_lowercase` may expand (U+0130 `İ` → `i` + U+0307); only the
/// leading char is kept, so every char maps to exactly one char and
/// context-sensitive rules like final sigma do not apply.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
