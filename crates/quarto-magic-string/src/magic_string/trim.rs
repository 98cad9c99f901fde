/*
 * trim.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Trimming the generated text at its edges.
//!
//! Trimming walks inward from an edge (buffer insertions first, then
//! chunks in render order) and stops at the first piece that still has
//! content after the pattern is stripped. Unedited chunks are split so
//! that only the stripped characters are marked as removed; edited
//! chunks just have their replacement content shortened.

use super::MagicString;
use crate::chunk::ChunkId;
use crate::error::Result;
use regex::Regex;

const DEFAULT_PATTERN: &str = r"\s";

fn start_pattern(pattern: Option<&str>) -> Result<Regex> {
    Ok(Regex::new(&format!(
        "^(?:{})+",
        pattern.unwrap_or(DEFAULT_PATTERN)
    ))?)
}

fn end_pattern(pattern: Option<&str>) -> Result<Regex> {
    Ok(Regex::new(&format!(
        "(?:{})+$",
        pattern.unwrap_or(DEFAULT_PATTERN)
    ))?)
}

fn strip(rx: &Regex, text: &mut String) {
    if let Some(m) = rx.find(text) {
        text.replace_range(m.range(), "");
    }
}

impl MagicString {
    /// Strip `pattern` (a regex for one repeated unit, default `\s`) from
    /// both ends of the generated text.
    pub fn trim(&mut self, pattern: Option<&str>) -> Result<&mut Self> {
        self.trim_start(pattern)?.trim_end(pattern)
    }

    /// Strip leading and trailing line breaks.
    pub fn trim_lines(&mut self) -> Result<&mut Self> {
        self.trim(Some(r"[\r\n]"))
    }

    pub fn trim_start(&mut self, pattern: Option<&str>) -> Result<&mut Self> {
        let rx = start_pattern(pattern)?;

        strip(&rx, &mut self.intro);
        if !self.intro.is_empty() {
            return Ok(self);
        }

        let mut current = Some(self.first_chunk);
        while let Some(id) = current {
            let (done, last) = self.trim_chunk_start(id, &rx);
            if done {
                return Ok(self);
            }
            current = self.chunks[last].next;
        }

        strip(&rx, &mut self.outro);
        Ok(self)
    }

    pub fn trim_end(&mut self, pattern: Option<&str>) -> Result<&mut Self> {
        let rx = end_pattern(pattern)?;

        strip(&rx, &mut self.outro);
        if !self.outro.is_empty() {
            return Ok(self);
        }

        let mut current = Some(self.last_chunk);
        while let Some(id) = current {
            if self.trim_chunk_end(id, &rx) {
                return Ok(self);
            }
            current = self.chunks[id].previous;
        }

        strip(&rx, &mut self.intro);
        Ok(self)
    }

    /// Returns whether trimming stopped in this chunk, and the id of the
    /// last piece the chunk was split into.
    fn trim_chunk_start(&mut self, id: ChunkId, rx: &Regex) -> (bool, ChunkId) {
        let chunk = &mut self.chunks[id];
        strip(rx, &mut chunk.intro);
        if !chunk.intro.is_empty() {
            return (true, id);
        }

        let mut trimmed = chunk.content.clone();
        strip(rx, &mut trimmed);

        if trimmed.is_empty() {
            chunk.edit("", None, true);
            strip(rx, &mut chunk.outro);
            return (!chunk.outro.is_empty(), id);
        }
        if trimmed.len() == chunk.content.len() {
            return (true, id);
        }

        if chunk.edited {
            chunk.content = trimmed;
            (true, id)
        } else {
            let index = chunk.end - trimmed.len();
            let rest = self.split_chunk(id, index);
            self.chunks[id].edit("", None, true);
            (true, rest)
        }
    }

    /// Returns whether trimming stopped in this chunk.
    fn trim_chunk_end(&mut self, id: ChunkId, rx: &Regex) -> bool {
        let chunk = &mut self.chunks[id];
        strip(rx, &mut chunk.outro);
        if !chunk.outro.is_empty() {
            return true;
        }

        let mut trimmed = chunk.content.clone();
        strip(rx, &mut trimmed);

        if trimmed.is_empty() {
            chunk.edit("", None, true);
            strip(rx, &mut chunk.intro);
            return !chunk.intro.is_empty();
        }
        if trimmed.len() == chunk.content.len() {
            return true;
        }

        if chunk.edited {
            chunk.content = trimmed;
        } else {
            let index = chunk.start + trimmed.len();
            let rest = self.split_chunk(id, index);
            self.chunks[rest].edit("", None, true);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::original_order;
    use crate::{MagicString, MagicStringError, OverwriteOptions};

    #[test]
    fn test_trim_unedited() {
        let mut s = MagicString::new("  abcdefghijkl   ");
        s.trim(None).unwrap();
        assert_eq!(s.to_string(), "abcdefghijkl");
        assert_eq!(original_order(&s), vec![(0, 2), (2, 14), (14, 17)]);
        assert_eq!(s.slice(2, 14).unwrap(), "abcdefghijkl");
    }

    #[test]
    fn test_trim_insertions() {
        let mut s = MagicString::new("  abc  ");
        s.prepend("\n  ").append("  \n");
        s.trim(None).unwrap();
        assert_eq!(s.to_string(), "abc");
    }

    #[test]
    fn test_trim_stops_at_inserted_content() {
        let mut s = MagicString::new("   abc   ");
        s.prepend("  x");
        s.append_left(9, "y ").unwrap();
        s.trim(None).unwrap();
        assert_eq!(s.to_string(), "x   abc   y");
    }

    #[test]
    fn test_trim_across_removed_chunks() {
        let mut s = MagicString::new("  abc  def  ");
        s.remove(2, 5).unwrap();
        s.trim(None).unwrap();
        assert_eq!(s.to_string(), "def");
    }

    #[test]
    fn test_trim_edited_content() {
        let mut s = MagicString::new("abcdef");
        s.overwrite(0, 3, "  X", OverwriteOptions::default()).unwrap();
        s.overwrite(3, 6, "Y\n\n", OverwriteOptions::default()).unwrap();
        s.trim(None).unwrap();
        assert_eq!(s.to_string(), "XY");
        assert_eq!(original_order(&s), vec![(0, 3), (3, 6)]);
    }

    #[test]
    fn test_trim_lines() {
        let mut s = MagicString::new("\n\n   abc   \n");
        s.trim_lines().unwrap();
        assert_eq!(s.to_string(), "   abc   ");
    }

    #[test]
    fn test_trim_custom_pattern() {
        let mut s = MagicString::new("--==abc==--");
        s.trim_start(Some("[-=]")).unwrap();
        assert_eq!(s.to_string(), "abc==--");
        s.trim_end(Some("-")).unwrap();
        assert_eq!(s.to_string(), "abc==");
    }

    #[test]
    fn test_trim_invalid_pattern() {
        let mut s = MagicString::new(" abc ");
        assert!(matches!(
            s.trim(Some("[")),
            Err(MagicStringError::InvalidPattern(_))
        ));
        assert_eq!(s.to_string(), " abc ");
    }

    #[test]
    fn test_trim_everything() {
        let mut s = MagicString::new("   \n  ");
        s.trim(None).unwrap();
        assert_eq!(s.to_string(), "");
        assert!(s.is_empty());
    }
}
