//! String values and symbolization.
//!
//! A [`StringValue`] carries either the raw byte sequence read from the
//! input source or, after symbolization, a sequence of 64-bit token ids.
//! Measures see both representations through the same [`Symbols`] iterator,
//! so an algorithm written once works on characters and on words.
//!
//! Symbolization is one-way: the byte buffer is consumed and replaced by the
//! token sequence. Applying it to an already tokenized value is a no-op.

use smallvec::SmallVec;

use crate::hash;

// ============================================================================
// Delimiter table
// ============================================================================

/// Lookup table of delimiter bytes controlling word tokenization.
///
/// An inactive table (the default, or one built from an empty specification)
/// disables symbolization entirely; values then stay byte sequences. The
/// table must be fixed before the first compare and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct DelimTable {
    table: [bool; 256],
    active: bool,
}

impl Default for DelimTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DelimTable {
    /// Create an inactive table.
    #[must_use]
    pub fn new() -> Self {
        Self { table: [false; 256], active: false }
    }

    /// Decode a delimiter specification into a table.
    ///
    /// The specification contains literal characters and `%HH` two-hex-digit
    /// escapes, e.g. `" %0a%0d"` for space, newline and carriage return. A
    /// truncated trailing escape is silently dropped; an empty specification
    /// yields an inactive table.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if spec.is_empty() {
            return Self::new();
        }

        let mut table = [false; 256];
        let bytes = spec.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'%' {
                table[bytes[i] as usize] = true;
                i += 1;
                continue;
            }
            if i + 2 >= bytes.len() {
                break;
            }
            if let Ok(b) = u8::from_str_radix(&spec[i + 1..i + 3], 16) {
                table[b as usize] = true;
            }
            i += 3;
        }
        Self { table, active: true }
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn is_delim(&self, b: u8) -> bool {
        self.table[b as usize]
    }

    /// The canonical delimiter: the lowest byte marked in the table. Every
    /// delimiter run collapses to a single occurrence of this byte.
    #[must_use]
    pub fn canonical(&self) -> Option<u8> {
        (0..=255u8).find(|&b| self.table[b as usize])
    }
}

// ============================================================================
// String value
// ============================================================================

/// Sequence payload of a [`StringValue`]. Exactly one representation is
/// populated at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum Repr {
    /// Raw byte sequence as read from the input source.
    Bytes(Vec<u8>),
    /// Token ids produced by [`StringValue::symbolize`].
    Tokens(Vec<u64>),
}

/// One input string with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StringValue {
    repr: Repr,
    /// Class label attached by the reader; opaque to the engine.
    pub label: f32,
    /// Originating source, e.g. a file name.
    pub src: Option<String>,
    /// Position in the original input collection.
    pub idx: usize,
}

impl StringValue {
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { repr: Repr::Bytes(data), label: 0.0, src: None, idx: 0 }
    }

    #[must_use]
    pub fn from_text(s: &str) -> Self {
        Self::from_bytes(s.as_bytes().to_vec())
    }

    #[must_use]
    pub fn with_label(mut self, label: f32) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    #[must_use]
    pub fn with_idx(mut self, idx: usize) -> Self {
        self.idx = idx;
        self
    }

    /// Element count of the populated sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Bytes(b) => b.len(),
            Repr::Tokens(t) => t.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_tokens(&self) -> bool {
        matches!(self.repr, Repr::Tokens(_))
    }

    #[must_use]
    pub fn repr(&self) -> &Repr {
        &self.repr
    }

    /// Iterate over the sequence elements, widened to `u64`.
    #[must_use]
    pub fn symbols(&self) -> Symbols<'_> {
        match &self.repr {
            Repr::Bytes(b) => Symbols::Bytes(b.iter()),
            Repr::Tokens(t) => Symbols::Tokens(t.iter()),
        }
    }

    /// Convert the byte sequence into a sequence of word token ids.
    ///
    /// Two passes: delimiter runs are first collapsed in place to a single
    /// occurrence of the canonical delimiter (a leading run is kept as one
    /// delimiter), then each non-empty span between delimiters is hashed to
    /// its token id. A trailing run yields no token.
    ///
    /// No-op if the table is inactive or the value is already tokenized.
    pub fn symbolize(&mut self, table: &DelimTable) {
        if !table.is_active() {
            return;
        }
        let Repr::Bytes(buf) = &mut self.repr else {
            return;
        };
        let dlm = table.canonical();

        // Collapse delimiter runs.
        let mut j = 0;
        for i in 0..buf.len() {
            let b = buf[i];
            if table.is_delim(b) {
                if j > 0 && table.is_delim(buf[j - 1]) {
                    continue;
                }
                buf[j] = dlm.unwrap_or(b);
            } else {
                buf[j] = b;
            }
            j += 1;
        }
        buf.truncate(j);

        // A buffer of n bytes holds at most n/2 + 1 words.
        let mut tokens = Vec::with_capacity(buf.len() / 2 + 1);
        let mut start = 0;
        for i in 0..=buf.len() {
            if i == buf.len() || Some(buf[i]) == dlm {
                if i > start {
                    tokens.push(hash::hash_bytes(&buf[start..i]));
                }
                start = i + 1;
            }
        }
        tokens.shrink_to_fit();

        self.repr = Repr::Tokens(tokens);
    }

    /// Stable 64-bit hash of the sequence content.
    #[must_use]
    pub fn hash1(&self) -> u64 {
        match &self.repr {
            Repr::Bytes(b) => hash::hash_bytes(b),
            Repr::Tokens(t) => hash::hash_symbols(t),
        }
    }

    /// Symmetric pair fingerprint: `hash1(self) ^ hash1(other)`.
    ///
    /// Order-independent by construction. The engine never relies on it for
    /// correctness; it exists for hosts that cache pair results.
    #[must_use]
    pub fn hash2(&self, other: &StringValue) -> u64 {
        self.hash1() ^ other.hash1()
    }
}

/// Iterator over the elements of a value, widened to `u64`.
#[derive(Debug, Clone)]
pub enum Symbols<'a> {
    Bytes(std::slice::Iter<'a, u8>),
    Tokens(std::slice::Iter<'a, u64>),
}

impl Iterator for Symbols<'_> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        match self {
            Symbols::Bytes(it) => it.next().map(|&b| u64::from(b)),
            Symbols::Tokens(it) => it.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Symbols::Bytes(it) => it.size_hint(),
            Symbols::Tokens(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for Symbols<'_> {}

/// Materialize the symbols of a value for random access.
#[inline]
#[must_use]
pub(crate) fn symbols_of(v: &StringValue) -> SmallVec<[u64; 64]> {
    v.symbols().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delim_parse_literal_and_escape() {
        let t = DelimTable::parse(" %09");
        assert!(t.is_active());
        assert!(t.is_delim(b' '));
        assert!(t.is_delim(b'\t'));
        assert!(!t.is_delim(b'a'));
        assert_eq!(t.canonical(), Some(b'\t'));
    }

    #[test]
    fn test_delim_parse_empty_is_inactive() {
        let t = DelimTable::parse("");
        assert!(!t.is_active());
        assert_eq!(t.canonical(), None);
    }

    #[test]
    fn test_delim_parse_truncated_escape() {
        // The trailing "%0" cannot be decoded and is dropped.
        let t = DelimTable::parse(",%0");
        assert!(t.is_delim(b','));
        assert!(!t.is_delim(b'0'));
        assert!(!t.is_delim(b'%'));
    }

    #[test]
    fn test_symbolize_words() {
        let table = DelimTable::parse(" %09");
        let mut v = StringValue::from_text("the  quick\tfox");
        v.symbolize(&table);

        assert!(v.is_tokens());
        assert_eq!(v.len(), 3);
        let expected = vec![
            hash::hash_bytes(b"the"),
            hash::hash_bytes(b"quick"),
            hash::hash_bytes(b"fox"),
        ];
        assert_eq!(v.repr(), &Repr::Tokens(expected));
    }

    #[test]
    fn test_symbolize_leading_and_trailing_delimiters() {
        let table = DelimTable::parse(" ");
        let mut v = StringValue::from_text("  a b  ");
        v.symbolize(&table);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_symbolize_idempotent_on_tokens() {
        let table = DelimTable::parse(" ");
        let mut v = StringValue::from_text("one two");
        v.symbolize(&table);
        let before = v.clone();
        v.symbolize(&table);
        assert_eq!(v, before);
    }

    #[test]
    fn test_symbolize_inactive_table_is_noop() {
        let table = DelimTable::new();
        let mut v = StringValue::from_text("one two");
        v.symbolize(&table);
        assert!(!v.is_tokens());
        assert_eq!(v.len(), 7);
    }

    #[test]
    fn test_symbolize_no_delimiter_hit_yields_single_token() {
        let table = DelimTable::parse(",");
        let mut v = StringValue::from_text("word");
        v.symbolize(&table);
        assert_eq!(v.repr(), &Repr::Tokens(vec![hash::hash_bytes(b"word")]));
    }

    #[test]
    fn test_symbols_widen_bytes() {
        let v = StringValue::from_text("ab");
        let syms: Vec<u64> = v.symbols().collect();
        assert_eq!(syms, vec![97, 98]);
    }

    #[test]
    fn test_hash2_symmetric() {
        let a = StringValue::from_text("abc");
        let b = StringValue::from_text("xyz");
        assert_eq!(a.hash2(&b), b.hash2(&a));
        assert_eq!(a.hash2(&b), a.hash1() ^ b.hash1());
        assert_eq!(a.hash2(&a), 0);
    }
}
