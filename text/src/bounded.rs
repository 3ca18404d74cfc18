use std::fmt::{self, Debug, Display, Write};

/// A text buffer with an inline capacity of `N` bytes.
#[derive(Clone, Copy)]
pub struct BoundedText<const N: usize> {
    buf: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> BoundedText<N> {
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Build a buffer holding as much of `text` as fits.
    pub fn truncated_from(text: &str) -> Self {
        let mut out = Self::new();
        out.push_str(text);
        out
    }

    pub fn as_str(&self) -> &str {
        // Only whole UTF-8 sequences are ever copied in.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn remaining(&self) -> usize {
        N - self.len
    }

    /// True once any write has been cut short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Replace the contents with as much of `text` as fits.
    pub fn set(&mut self, text: &str) -> bool {
        self.clear();
        self.push_str(text)
    }

    /// Append as much of `text` as fits. Returns false if anything was cut.
    pub fn push_str(&mut self, text: &str) -> bool {
        if self.truncated {
            return text.is_empty();
        }

        let remaining = self.remaining();
        let take = if text.len() <= remaining {
            text.len()
        } else {
            self.truncated = true;
            floor_char_boundary(text, remaining)
        };

        self.buf[self.len..self.len + take].copy_from_slice(&text.as_bytes()[..take]);
        self.len += take;

        take == text.len()
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        let mut encoded = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut encoded))
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl<const N: usize> Default for BoundedText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for BoundedText<N> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        // Truncation is not an error for display text.
        self.push_str(text);
        Ok(())
    }
}

impl<const N: usize> Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> AsRef<str> for BoundedText<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> PartialEq for BoundedText<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for BoundedText<N> {}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
