use std::fmt::{self, Debug, Display, Formatter};
use std::str;

/// A string builder over a fixed, caller provided buffer.
///
/// The converters write their output through one of these, so that formatting a number never
/// allocates. Only ASCII and whole `&str`s can be added, which keeps the written part valid UTF-8
/// at all times.
///
/// Writing past the end of the buffer is a bug in the caller and panics.
///
/// # Examples
/// ```
/// # use float_conv::num::convert::StringBuilder;
/// let mut buffer = [0_u8; 16];
/// let mut builder = StringBuilder::new(&mut buffer);
/// builder.add_string("1.5");
/// builder.add_character(b'e');
/// builder.add_padding(b'0', 2);
/// assert_eq!(builder.finalize(), "1.5e00");
/// ```
pub struct StringBuilder<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> StringBuilder<'a> {
    pub const fn new(buffer: &'a mut [u8]) -> StringBuilder<'a> {
        StringBuilder {
            buffer,
            position: 0,
        }
    }

    /// The number of bytes written so far.
    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Forgets everything written so far.
    pub const fn reset(&mut self) {
        self.position = 0;
    }

    /// # Panics
    /// Panics if `c` isn't ASCII or the buffer is full.
    pub fn add_character(&mut self, c: u8) {
        assert!(c.is_ascii(), "StringBuilder only accepts ASCII characters!");
        self.reserve(1);
        self.buffer[self.position] = c;
        self.position += 1;
    }

    /// # Panics
    /// Panics if the buffer doesn't have room for `s`.
    pub fn add_string(&mut self, s: &str) {
        self.add_unchecked(s.as_bytes());
    }

    /// Adds a run of ASCII bytes, such as the digits generated by
    /// [`double_to_ascii`](crate::num::dtoa::double_to_ascii).
    ///
    /// # Panics
    /// Panics if `s` isn't ASCII or the buffer doesn't have room for it.
    pub fn add_substring(&mut self, s: &[u8]) {
        assert!(s.is_ascii(), "StringBuilder only accepts ASCII characters!");
        self.add_unchecked(s);
    }

    /// Adds `count` copies of `c`.
    ///
    /// # Panics
    /// Panics if `c` isn't ASCII or the buffer doesn't have room for the padding.
    pub fn add_padding(&mut self, c: u8, count: usize) {
        assert!(c.is_ascii(), "StringBuilder only accepts ASCII characters!");
        self.reserve(count);
        self.buffer[self.position..self.position + count].fill(c);
        self.position += count;
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: Only ASCII bytes and complete &strs are ever written before position, so the
        // written part is always valid UTF-8.
        unsafe { str::from_utf8_unchecked(&self.buffer[..self.position]) }
    }

    /// Consumes the builder, returning everything written as a `&str` borrowed from the buffer.
    pub fn finalize(self) -> &'a str {
        let buffer: &'a [u8] = self.buffer;
        let written = &buffer[..self.position];
        // SAFETY: See as_str.
        unsafe { str::from_utf8_unchecked(written) }
    }

    /// Copies bytes that are known to keep the buffer valid UTF-8.
    fn add_unchecked(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.buffer[self.position..self.position + bytes.len()].copy_from_slice(bytes);
        self.position += bytes.len();
    }

    fn reserve(&self, additional: usize) {
        assert!(
            self.position + additional <= self.buffer.len(),
            "StringBuilder capacity overflow!"
        );
    }
}

impl Display for StringBuilder<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Debug for StringBuilder<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuilder")
            .field("written", &self.as_str())
            .field("capacity", &self.capacity())
            .finish()
    }
}
