/*
 * query.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Read-only views of the buffer.

use super::MagicString;
use crate::error::{MagicStringError, Result};

impl MagicString {
    /// The generated text for the original range `[start, end)`.
    ///
    /// Chunks are visited in original order, so moved content is reported
    /// where it came from rather than where it renders now. Insertions on
    /// the inside of `start` and `end` are included. Fails when either end
    /// falls strictly inside a replaced span.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(String::new());
        }

        let Some(start_chunk) = self.chunk_at(start) else {
            return Ok(String::new());
        };
        if self.chunks[start_chunk].edited && self.chunks[start_chunk].start != start {
            return Err(MagicStringError::InvalidAnchor {
                index: start,
                role: "slice start",
            });
        }

        let mut result = String::new();
        let mut current = Some(start_chunk);
        while let Some(id) = current {
            let chunk = &self.chunks[id];

            if id != start_chunk || chunk.start == start {
                result.push_str(&chunk.intro);
            }

            let contains_end = chunk.start < end && chunk.end >= end;
            if contains_end && chunk.edited && chunk.end != end {
                return Err(MagicStringError::InvalidAnchor {
                    index: end,
                    role: "slice end",
                });
            }

            let slice_start = if id == start_chunk {
                start - chunk.start
            } else {
                0
            };
            let slice_end = if contains_end {
                chunk.content.len() - (chunk.end - end)
            } else {
                chunk.content.len()
            };
            result.push_str(&chunk.content[slice_start..slice_end]);

            if !contains_end || chunk.end == end {
                result.push_str(&chunk.outro);
            }
            if contains_end {
                break;
            }
            current = self.by_start.get(&chunk.end).copied();
        }

        Ok(result)
    }

    /// Length of the generated text, in bytes.
    pub fn len(&self) -> usize {
        self.intro.len()
            + self.chunks.iter().map(|c| c.rendered_len()).sum::<usize>()
            + self.outro.len()
    }

    /// True when the generated text is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.render_pieces().all(|piece| piece.trim().is_empty())
    }

    /// True when the generated text differs from the original.
    pub fn has_changed(&self) -> bool {
        let mut remaining = &self.original[..];
        for piece in self.render_pieces() {
            match remaining.strip_prefix(piece) {
                Some(rest) => remaining = rest,
                None => return true,
            }
        }
        !remaining.is_empty()
    }

    /// The last character of the generated text.
    pub fn last_char(&self) -> Option<char> {
        let pieces: Vec<&str> = self.render_pieces().collect();
        pieces.iter().rev().find_map(|piece| piece.chars().next_back())
    }

    /// The generated text after the last newline.
    pub fn last_line(&self) -> String {
        let pieces: Vec<&str> = self.render_pieces().collect();
        let mut tail = Vec::new();
        for &piece in pieces.iter().rev() {
            if let Some(newline) = piece.rfind('\n') {
                tail.push(&piece[newline + 1..]);
                break;
            }
            tail.push(piece);
        }
        tail.into_iter().rev().collect()
    }
}
