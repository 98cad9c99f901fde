/*
 * offset.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A view of a buffer with shifted coordinates.

use crate::error::Result;
use crate::magic_string::MagicString;
use crate::options::OverwriteOptions;

/// Borrows a [`MagicString`] and adds `offset` to every position passed in.
///
/// Useful when code that edits a fragment only knows positions relative to
/// where that fragment starts in the original text.
///
/// ```rust
/// use quarto_magic_string::{MagicString, OffsetMagicString, OverwriteOptions};
///
/// let mut s = MagicString::new("let x = foo(1);");
/// let mut args = OffsetMagicString::new(&mut s, 12);
/// args.overwrite(0, 1, "2", OverwriteOptions::default())?;
/// assert_eq!(s.to_string(), "let x = foo(2);");
/// # Ok::<(), quarto_magic_string::MagicStringError>(())
/// ```
#[derive(Debug)]
pub struct OffsetMagicString<'a> {
    inner: &'a mut MagicString,
    offset: usize,
}

impl<'a> OffsetMagicString<'a> {
    pub fn new(inner: &'a mut MagicString, offset: usize) -> Self {
        OffsetMagicString { inner, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The underlying buffer.
    pub fn inner(&self) -> &MagicString {
        self.inner
    }

    fn shift(&self, index: usize) -> usize {
        // An overflowing offset reports as out of bounds
        index.saturating_add(self.offset)
    }

    pub fn append_left(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.inner.append_left(self.shift(index), content)?;
        Ok(self)
    }

    pub fn append_right(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.inner.append_right(self.shift(index), content)?;
        Ok(self)
    }

    pub fn prepend_left(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.inner.prepend_left(self.shift(index), content)?;
        Ok(self)
    }

    pub fn prepend_right(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.inner.prepend_right(self.shift(index), content)?;
        Ok(self)
    }

    pub fn overwrite(
        &mut self,
        start: usize,
        end: usize,
        content: &str,
        options: OverwriteOptions,
    ) -> Result<&mut Self> {
        let (start, end) = (self.shift(start), self.shift(end));
        self.inner.overwrite(start, end, content, options)?;
        Ok(self)
    }

    pub fn update(
        &mut self,
        start: usize,
        end: usize,
        content: &str,
        options: OverwriteOptions,
    ) -> Result<&mut Self> {
        let (start, end) = (self.shift(start), self.shift(end));
        self.inner.update(start, end, content, options)?;
        Ok(self)
    }

    pub fn remove(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        let (start, end) = (self.shift(start), self.shift(end));
        self.inner.remove(start, end)?;
        Ok(self)
    }

    pub fn reset(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        let (start, end) = (self.shift(start), self.shift(end));
        self.inner.reset(start, end)?;
        Ok(self)
    }

    pub fn move_to(&mut self, start: usize, end: usize, index: usize) -> Result<&mut Self> {
        let (start, end, index) = (self.shift(start), self.shift(end), self.shift(index));
        self.inner.move_to(start, end, index)?;
        Ok(self)
    }

    pub fn add_sourcemap_location(&mut self, index: usize) -> Result<&mut Self> {
        self.inner.add_sourcemap_location(self.shift(index))?;
        Ok(self)
    }

    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.inner.slice(self.shift(start), self.shift(end))
    }
}
