/*
 * indent.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Indenting every line of the generated text.

use super::MagicString;
use crate::error::{MagicStringError, Result};
use crate::options::IndentOptions;
use std::sync::Arc;

/// Indent each non-empty line start of `text`.
///
/// `indent_next` carries state across pieces: when it is false, the next
/// line start is skipped (it continues a line begun elsewhere) and the flag
/// is set again.
fn indent_text(text: &str, indent: &str, indent_next: &mut bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_line_start = true;
    for ch in text.chars() {
        if at_line_start && ch != '\r' && ch != '\n' {
            if *indent_next {
                out.push_str(indent);
            } else {
                *indent_next = true;
            }
        }
        out.push(ch);
        at_line_start = ch == '\n';
    }
    out
}

impl MagicString {
    /// Insert `indent` at the start of every line.
    ///
    /// Lines of the original text are indented through insertions in front
    /// of the chunk starting there, so later edits and the generated map
    /// stay consistent. Replaced content and buffer-level insertions are
    /// indented in place. Original characters inside the exclusion ranges
    /// are never indented.
    pub fn indent(&mut self, indent: &str, options: &IndentOptions) -> Result<&mut Self> {
        if indent.is_empty() {
            return Ok(self);
        }

        let exclusions = options
            .exclude
            .clone()
            .unwrap_or_else(|| self.indent_exclusion_ranges.clone());
        for &(start, end) in &exclusions {
            self.check_range(start, end)?;
            for index in [start, end] {
                if let Some(id) = self.chunk_containing(index) {
                    if self.chunks[id].edited {
                        return Err(MagicStringError::InvalidAnchor {
                            index,
                            role: "indent exclusion",
                        });
                    }
                }
            }
        }
        let is_excluded =
            |index: usize| exclusions.iter().any(|&(start, end)| start <= index && index < end);

        let mut indent_next = options.indent_start;
        self.intro = indent_text(&self.intro, indent, &mut indent_next);

        let original = Arc::clone(&self.original);
        let mut current = Some(self.first_chunk);
        while let Some(mut id) = current {
            let chunk = &mut self.chunks[id];

            if chunk.edited {
                if !is_excluded(chunk.start) {
                    chunk.content = indent_text(&chunk.content, indent, &mut indent_next);
                    if let Some(last) = chunk.content.chars().next_back() {
                        indent_next = last == '\n';
                    }
                }
            } else {
                let (start, end) = (chunk.start, chunk.end);
                for (offset, ch) in original[start..end].char_indices() {
                    let index = start + offset;
                    if is_excluded(index) {
                        continue;
                    }
                    if ch == '\n' {
                        indent_next = true;
                    } else if ch != '\r' && indent_next {
                        indent_next = false;
                        if index != self.chunks[id].start {
                            id = self.split_chunk(id, index);
                        }
                        self.chunks[id].prepend_right(indent);
                    }
                }
            }

            current = self.chunks[id].next;
        }

        self.outro = indent_text(&self.outro, indent, &mut indent_next);
        tracing::debug!(chunks = self.chunks.len(), "Indented buffer");
        Ok(self)
    }
}
