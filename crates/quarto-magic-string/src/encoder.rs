/*
 * encoder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Turning a buffer into source map segments.

use crate::chunk::ChunkView;
use crate::error::Result;
use crate::magic_string::MagicString;
use crate::options::{Hires, SourceMapOptions};
use quarto_source_map::{basename, relative_path, DecodedSourceMap, Location, Segment, SourceMap};
use std::collections::BTreeSet;

fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Accumulates segments line by line while the generated text is walked
/// in render order.
#[derive(Debug)]
pub struct Mappings {
    hires: Hires,
    generated_column: u32,
    raw: Vec<Vec<Segment>>,
}

impl Mappings {
    pub fn new(hires: Hires) -> Self {
        Mappings {
            hires,
            generated_column: 0,
            raw: vec![Vec::new()],
        }
    }

    fn segments(&mut self) -> &mut Vec<Segment> {
        if self.raw.is_empty() {
            self.raw.push(Vec::new());
        }
        let last = self.raw.len() - 1;
        &mut self.raw[last]
    }

    fn new_line(&mut self) {
        self.raw.push(Vec::new());
        self.generated_column = 0;
    }

    /// Move the generated position past `text` without adding segments.
    pub fn advance(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut lines = text.split('\n');
        let last = lines.next_back().unwrap_or_default();
        for _ in lines {
            self.new_line();
        }
        self.generated_column += utf16_len(last);
    }

    /// Inserted text has no original position; it gets an unmapped segment
    /// so the preceding mapping does not extend over it.
    pub fn add_insertion(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let column = self.generated_column;
        self.segments().push(Segment::unmapped(column));
        self.advance(text);
    }

    /// Replacement content maps every generated line it spans to the start
    /// of the replaced original range. Whitespace-only content without a
    /// name is not mapped.
    pub fn add_edit(
        &mut self,
        source_index: u32,
        content: &str,
        loc: Location,
        name_index: Option<u32>,
    ) {
        if content.trim().is_empty() && name_index.is_none() {
            self.advance(content);
            return;
        }

        let line = loc.line as u32;
        let column = loc.column as u32;
        let mut lines = content.split('\n').peekable();
        while let Some(text) = lines.next() {
            let is_last = lines.peek().is_none();
            // A trailing newline does not open a mapped line
            if !(is_last && text.is_empty()) {
                let generated_column = self.generated_column;
                self.segments().push(Segment::mapped(
                    generated_column,
                    source_index,
                    line,
                    column,
                    name_index,
                ));
            }
            if is_last {
                self.generated_column += utf16_len(text);
            } else {
                self.new_line();
            }
        }
    }

    /// Unedited content maps character by character to itself.
    pub fn add_unedited_chunk(
        &mut self,
        source_index: u32,
        chunk: &ChunkView<'_>,
        loc: Location,
        sourcemap_locations: &BTreeSet<usize>,
    ) {
        let mut line = loc.line as u32;
        let mut column = loc.column as u32;
        let mut first = true;
        let mut in_word = false;

        for (offset, ch) in chunk.original.char_indices() {
            if ch == '\n' {
                line += 1;
                column = 0;
                self.new_line();
                first = true;
                in_word = false;
                continue;
            }

            let index = chunk.start + offset;
            if self.hires != Hires::Off || first || sourcemap_locations.contains(&index) {
                let segment =
                    Segment::mapped(self.generated_column, source_index, line, column, None);
                match self.hires {
                    Hires::Boundary if is_word_char(ch) => {
                        if !in_word {
                            self.segments().push(segment);
                            in_word = true;
                        }
                    }
                    Hires::Boundary => {
                        self.segments().push(segment);
                        in_word = false;
                    }
                    _ => self.segments().push(segment),
                }
            }

            let width = ch.len_utf16() as u32;
            column += width;
            self.generated_column += width;
            first = false;
        }
    }

    pub fn into_raw(self) -> Vec<Vec<Segment>> {
        self.raw
    }
}

impl MagicString {
    /// Build the source map for the current state, with decoded segments.
    pub fn generate_decoded_map(&self, options: &SourceMapOptions) -> Result<DecodedSourceMap> {
        let source_index = 0;
        let names: Vec<String> = self.stored_names().map(str::to_string).collect();
        let mut mappings = Mappings::new(options.hires);

        mappings.add_insertion(self.intro());
        for chunk in self.chunks() {
            let loc = self.locator().locate(chunk.start)?;
            mappings.add_insertion(chunk.intro);

            if chunk.edited {
                let name_index = chunk
                    .name
                    .and_then(|name| self.name_index(name))
                    .map(|index| index as u32);
                mappings.add_edit(source_index, chunk.content, loc, name_index);
            } else {
                mappings.add_unedited_chunk(
                    source_index,
                    &chunk,
                    loc,
                    self.sourcemap_locations(),
                );
            }

            mappings.add_insertion(chunk.outro);
        }
        mappings.add_insertion(self.outro());

        let file = options.file.as_deref();
        let source = match (&options.source, file) {
            (Some(source), _) => relative_path(file.unwrap_or_default(), source),
            (None, Some(file)) => file.to_string(),
            (None, None) => String::new(),
        };
        let mappings = mappings.into_raw();
        tracing::debug!(
            lines = mappings.len(),
            names = names.len(),
            hires = ?options.hires,
            "Generated source map"
        );

        Ok(DecodedSourceMap {
            file: file.map(|f| basename(f).to_string()),
            sources: vec![source],
            sources_content: options
                .include_content
                .then(|| vec![Some(self.original().to_string())]),
            names,
            mappings,
            x_google_ignore_list: self.ignore_list().then(|| vec![source_index]),
        })
    }

    /// Build the encoded source map for the current state.
    pub fn generate_map(&self, options: &SourceMapOptions) -> Result<SourceMap> {
        Ok(self.generate_decoded_map(options)?.encode())
    }
}
