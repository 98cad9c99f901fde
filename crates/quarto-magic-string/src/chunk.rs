/*
 * chunk.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Chunks: the atomic ranges of the edit buffer.

use crate::magic_string::MagicString;

/// Index of a chunk in its buffer's arena.
pub(crate) type ChunkId = usize;

/// One contiguous `[start, end)` range of the original text and its
/// current rendering.
///
/// `start` and `end` never change once the chunk exists, except that a
/// split shortens `end`. Render order links (`previous`/`next`) are arena
/// indices owned by the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chunk {
    pub start: usize,
    pub end: usize,
    pub content: String,
    /// Text inserted right before `content` (prepend-right / append-right).
    pub intro: String,
    /// Text inserted right after `content` (append-left / prepend-left).
    pub outro: String,
    pub edited: bool,
    /// Index into the buffer's stored names, for a replacement made with
    /// `store_name`.
    pub name: Option<usize>,
    pub previous: Option<ChunkId>,
    pub next: Option<ChunkId>,
}

impl Chunk {
    pub fn new(start: usize, end: usize, content: &str) -> Self {
        Chunk {
            start,
            end,
            content: content.to_string(),
            intro: String::new(),
            outro: String::new(),
            edited: false,
            name: None,
            previous: None,
            next: None,
        }
    }

    /// True when `index` lies strictly inside this chunk.
    pub fn contains(&self, index: usize) -> bool {
        self.start < index && index < self.end
    }

    pub fn append_left(&mut self, content: &str) {
        self.outro.push_str(content);
    }

    pub fn append_right(&mut self, content: &str) {
        self.intro.push_str(content);
    }

    pub fn prepend_left(&mut self, content: &str) {
        self.outro.insert_str(0, content);
    }

    pub fn prepend_right(&mut self, content: &str) {
        self.intro.insert_str(0, content);
    }

    /// Replace the rendered content. Unless `content_only`, insertions go too.
    pub fn edit(&mut self, content: &str, name: Option<usize>, content_only: bool) {
        self.content = content.to_string();
        if !content_only {
            self.intro.clear();
            self.outro.clear();
        }
        self.name = name;
        self.edited = true;
    }

    /// Drop insertions and restore the original text.
    pub fn reset(&mut self, original: &str) {
        self.intro.clear();
        self.outro.clear();
        if self.edited {
            self.content = original.to_string();
            self.name = None;
            self.edited = false;
        }
    }

    /// Shorten this chunk to `[start, index)` and return the `[index, end)`
    /// remainder, unlinked.
    ///
    /// The remainder takes over the outro. `original` is the original text
    /// of this chunk before the split. An edited chunk may only be split
    /// while its content is empty; both halves then stay empty and edited.
    pub fn split_off(&mut self, index: usize, original: &str) -> Chunk {
        let slice_index = index - self.start;
        let (before, after) = original.split_at(slice_index);

        let mut remainder = Chunk::new(index, self.end, after);
        remainder.outro = std::mem::take(&mut self.outro);
        self.end = index;

        if self.edited {
            remainder.edit("", None, true);
            self.content.clear();
        } else {
            self.content = before.to_string();
        }

        remainder
    }

    pub fn rendered_len(&self) -> usize {
        self.intro.len() + self.content.len() + self.outro.len()
    }
}

/// Read-only view of a chunk, as seen by callers that compose buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkView<'a> {
    /// Original offset where this chunk starts.
    pub start: usize,
    /// Original offset where this chunk ends.
    pub end: usize,
    pub intro: &'a str,
    pub content: &'a str,
    pub outro: &'a str,
    /// The original text of `[start, end)`.
    pub original: &'a str,
    pub edited: bool,
    pub store_name: bool,
    /// The stored name this replacement maps to.
    pub name: Option<&'a str>,
}

/// Iterator over a buffer's chunks in render order.
pub struct Chunks<'a> {
    buffer: &'a MagicString,
    next: Option<ChunkId>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(buffer: &'a MagicString, first: ChunkId) -> Self {
        Chunks {
            buffer,
            next: Some(first),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = ChunkView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let buffer = self.buffer;
        let chunk = buffer.chunk(id);
        self.next = chunk.next;

        Some(ChunkView {
            start: chunk.start,
            end: chunk.end,
            intro: &chunk.intro,
            content: &chunk.content,
            outro: &chunk.outro,
            original: &buffer.original()[chunk.start..chunk.end],
            edited: chunk.edited,
            store_name: chunk.name.is_some(),
            name: chunk.name.and_then(|index| buffer.stored_name(index)),
        })
    }
}
