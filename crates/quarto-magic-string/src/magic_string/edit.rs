/*
 * edit.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Mutating operations.

use super::MagicString;
use crate::error::{MagicStringError, Result};
use crate::options::OverwriteOptions;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;

impl MagicString {
    /// Prepend `content` to the whole buffer.
    pub fn prepend(&mut self, content: &str) -> &mut Self {
        self.intro.insert_str(0, content);
        self
    }

    /// Append `content` to the whole buffer.
    pub fn append(&mut self, content: &str) -> &mut Self {
        self.outro.push_str(content);
        self
    }

    /// Append to the text that sticks to the chunk ending at `index`.
    ///
    /// Successive calls at the same index keep call order.
    pub fn append_left(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.split(index)?;
        match self.by_end.get(&index) {
            Some(&id) => self.chunks[id].append_left(content),
            None => self.intro.push_str(content),
        }
        Ok(self)
    }

    /// Append to the text that sticks to the chunk starting at `index`.
    pub fn append_right(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.split(index)?;
        match self.by_start.get(&index) {
            Some(&id) => self.chunks[id].append_right(content),
            None => self.outro.push_str(content),
        }
        Ok(self)
    }

    /// Prepend to the text that sticks to the chunk ending at `index`.
    pub fn prepend_left(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.split(index)?;
        match self.by_end.get(&index) {
            Some(&id) => self.chunks[id].prepend_left(content),
            None => self.intro.insert_str(0, content),
        }
        Ok(self)
    }

    /// Prepend to the text that sticks to the chunk starting at `index`.
    ///
    /// Successive calls at the same index end up in reverse call order.
    pub fn prepend_right(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        self.split(index)?;
        match self.by_start.get(&index) {
            Some(&id) => self.chunks[id].prepend_right(content),
            None => self.outro.insert_str(0, content),
        }
        Ok(self)
    }

    #[deprecated(note = "use `append_left` instead")]
    pub fn insert_left(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        tracing::warn!("MagicString::insert_left is deprecated, use append_left instead");
        self.append_left(index, content)
    }

    #[deprecated(note = "use `prepend_right` instead")]
    pub fn insert_right(&mut self, index: usize, content: &str) -> Result<&mut Self> {
        tracing::warn!("MagicString::insert_right is deprecated, use prepend_right instead");
        self.prepend_right(index, content)
    }

    /// Replace the original range `[start, end)` with `content`.
    ///
    /// Text inserted inside the range (at `start` on the right, at `end` on
    /// the left, and at every interior boundary) is dropped, unless
    /// `content_only` is set, in which case it is kept around the new
    /// content. Text attached to the outside of the range is untouched.
    pub fn overwrite(
        &mut self,
        start: usize,
        end: usize,
        content: &str,
        options: OverwriteOptions,
    ) -> Result<&mut Self> {
        self.check_range(start, end)?;
        if start == end {
            return Err(MagicStringError::ZeroLengthOverwrite);
        }

        let covered = self.chunks_in_range(start, end);
        if let Some(&id) = covered
            .iter()
            .find(|&&id| self.chunks[id].edited && !self.chunks[id].content.is_empty())
        {
            let chunk = &self.chunks[id];
            return Err(MagicStringError::DoubleEdit {
                start,
                end,
                original: self.original[chunk.start..chunk.end].to_string(),
            });
        }
        if covered
            .windows(2)
            .any(|pair| self.chunks[pair[0]].next != Some(pair[1]))
        {
            return Err(MagicStringError::DiscontiguousOverwrite);
        }

        self.split(start)?;
        self.split(end)?;
        tracing::debug!(start, end, "Overwriting range");

        // The name covers the whole range, even when it spans several chunks
        let name = options.store_name.then(|| {
            self.stored_names
                .insert_full(self.original[start..end].to_string())
                .0
        });

        // Boundaries exist now, and the range is contiguous in render order
        let chain = self.chunks_in_range(start, end);
        let (first, rest) = chain
            .split_first()
            .ok_or(MagicStringError::DiscontiguousOverwrite)?;

        if options.content_only {
            let intro: String = chain.iter().map(|&id| self.chunks[id].intro.as_str()).collect();
            let outro: String = chain.iter().map(|&id| self.chunks[id].outro.as_str()).collect();
            for &id in rest {
                self.chunks[id].edit("", None, false);
            }
            let chunk = &mut self.chunks[*first];
            chunk.intro = intro;
            chunk.outro = outro;
            chunk.edit(content, name, true);
        } else {
            for &id in rest {
                self.chunks[id].edit("", None, false);
            }
            self.chunks[*first].edit(content, name, false);
        }

        Ok(self)
    }

    /// Like [`overwrite`](Self::overwrite), but always keeps insertions.
    pub fn update(
        &mut self,
        start: usize,
        end: usize,
        content: &str,
        options: OverwriteOptions,
    ) -> Result<&mut Self> {
        self.overwrite(
            start,
            end,
            content,
            OverwriteOptions {
                content_only: true,
                ..options
            },
        )
    }

    /// Remove the original range `[start, end)` along with text inserted
    /// inside it. Empty and inverted ranges are a no-op.
    ///
    /// Chunks are found by original position, so this works regardless of
    /// earlier moves.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        if start >= end {
            return Ok(self);
        }
        self.check_splittable(start)?;
        self.check_splittable(end)?;
        self.split(start)?;
        self.split(end)?;

        for id in self.chunks_in_range(start, end) {
            let chunk = &mut self.chunks[id];
            chunk.intro.clear();
            chunk.outro.clear();
            chunk.edit("", None, false);
        }
        Ok(self)
    }

    /// Undo edits and insertions inside `[start, end)`.
    pub fn reset(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        if start >= end {
            return Ok(self);
        }
        self.check_splittable(start)?;
        self.check_splittable(end)?;
        self.split(start)?;
        self.split(end)?;

        let original = Arc::clone(&self.original);
        for id in self.chunks_in_range(start, end) {
            let chunk = &mut self.chunks[id];
            let range = chunk.start..chunk.end;
            chunk.reset(&original[range]);
        }
        Ok(self)
    }

    /// Move the original range `[start, end)` so it renders right before
    /// the chunk starting at `index`, wherever that chunk renders now (at
    /// the very end for `index == len`).
    ///
    /// Fails when `index` lies within `[start, end]`.
    pub fn move_to(&mut self, start: usize, end: usize, index: usize) -> Result<&mut Self> {
        self.check_range(start, end)?;
        self.check_index(index)?;
        if index >= start && index <= end {
            return Err(MagicStringError::IllegalMove);
        }
        if start == end {
            return Ok(self);
        }
        for boundary in [start, end, index] {
            self.check_splittable(boundary)?;
        }
        for boundary in [start, end, index] {
            self.split(boundary)?;
        }
        tracing::debug!(start, end, index, "Moving range");

        let selected: BTreeSet<_> = self.chunks_in_range(start, end).into_iter().collect();
        let moving: Vec<_> = self
            .chunk_ids_in_render_order()
            .filter(|id| selected.contains(id))
            .collect();
        let before = self.by_start.get(&index).copied();

        for &id in &moving {
            self.unlink(id);
        }
        for &id in &moving {
            self.link_before(id, before);
        }
        Ok(self)
    }

    fn chunk_ids_in_render_order(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.first_chunk), |&id| self.chunks[id].next)
    }

    /// A copy of the buffer with everything outside `[start, end)` removed.
    pub fn snip(&self, start: usize, end: usize) -> Result<MagicString> {
        self.check_range(start, end)?;
        let mut clone = self.clone();
        clone.remove(0, start)?;
        clone.remove(end, self.original.len())?;
        Ok(clone)
    }

    /// Replace the first occurrence of `search` in the original text.
    pub fn replace(&mut self, search: &str, replacement: &str) -> Result<&mut Self> {
        if search.is_empty() {
            return Ok(self);
        }
        if let Some(start) = self.original.find(search) {
            self.update(start, start + search.len(), replacement, OverwriteOptions::default())?;
        }
        Ok(self)
    }

    /// Replace every occurrence of `search` in the original text.
    pub fn replace_all(&mut self, search: &str, replacement: &str) -> Result<&mut Self> {
        if search.is_empty() {
            return Ok(self);
        }
        let original = Arc::clone(&self.original);
        let ranges = original
            .match_indices(search)
            .map(|(start, matched)| (start, start + matched.len(), replacement.to_string()));
        self.apply_replacements(ranges)
    }

    /// Replace every non-empty match of `regex` in the original text.
    ///
    /// `replacement` may refer to capture groups as `$1` or `${name}`.
    pub fn replace_regex(&mut self, regex: &Regex, replacement: &str) -> Result<&mut Self> {
        let original = Arc::clone(&self.original);
        let ranges = regex.captures_iter(&original).filter_map(|caps| {
            let matched = caps.get(0)?;
            if matched.is_empty() {
                return None;
            }
            let mut expanded = String::new();
            caps.expand(replacement, &mut expanded);
            Some((matched.start(), matched.end(), expanded))
        });
        self.apply_replacements(ranges)
    }

    /// Apply all updates or none of them.
    fn apply_replacements(
        &mut self,
        ranges: impl Iterator<Item = (usize, usize, String)>,
    ) -> Result<&mut Self> {
        let mut next = self.clone();
        for (start, end, content) in ranges {
            next.update(start, end, &content, OverwriteOptions::default())?;
        }
        *self = next;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{original_order, render_order};
    use crate::{MagicString, MagicStringError, OverwriteOptions};

    fn overwrite(s: &mut MagicString, start: usize, end: usize, content: &str) {
        s.overwrite(start, end, content, OverwriteOptions::default())
            .unwrap();
    }

    #[test]
    fn test_insertion_order() {
        let mut s = MagicString::new("0123456789");
        s.append_left(5, "A").unwrap();
        s.prepend_right(5, "a").unwrap();
        s.prepend_right(5, "b").unwrap();
        s.append_left(5, "B").unwrap();
        s.append_left(5, "C").unwrap();
        s.prepend_right(5, "c").unwrap();
        assert_eq!(s.to_string(), "01234ABCcba56789");
    }

    #[test]
    fn test_left_and_right_slots() {
        let mut s = MagicString::new("0123456789");
        s.prepend_left(5, "A").unwrap();
        s.prepend_left(5, "B").unwrap();
        s.append_right(5, "a").unwrap();
        s.append_right(5, "b").unwrap();
        assert_eq!(s.to_string(), "01234BAab56789");
    }

    #[test]
    fn test_insertions_at_the_edges() {
        let mut s = MagicString::new("abc");
        s.append_left(0, "<").unwrap();
        s.prepend_right(3, ">").unwrap();
        s.prepend("[").append("]");
        assert_eq!(s.to_string(), "[<abc>]");
    }

    #[test]
    fn test_insertion_out_of_bounds() {
        let mut s = MagicString::new("abc");
        assert!(matches!(
            s.append_left(4, "x"),
            Err(MagicStringError::OutOfBounds { index: 4, length: 3 })
        ));
        assert_eq!(s.to_string(), "abc");
    }

    #[test]
    fn test_overwrite_single_range() {
        let mut s = MagicString::new("abcdefghijkl");
        overwrite(&mut s, 5, 7, "XX");
        assert_eq!(s.to_string(), "abcdeXXhijkl");
        assert_eq!(original_order(&s), vec![(0, 5), (5, 7), (7, 12)]);
    }

    #[test]
    fn test_overwrite_zero_length_fails() {
        let mut s = MagicString::new("abcdef");
        for i in 0..=6 {
            assert!(matches!(
                s.overwrite(i, i, "x", OverwriteOptions::default()),
                Err(MagicStringError::ZeroLengthOverwrite)
            ));
        }
        assert_eq!(s.to_string(), "abcdef");
    }

    #[test]
    fn test_overwrite_drops_interior_inserts() {
        let mut s = MagicString::new("abcdefghijkl");
        s.append_left(1, "A").unwrap();
        s.prepend_right(1, "B").unwrap();
        s.append_left(11, "C").unwrap();
        s.prepend_right(11, "D").unwrap();
        s.append_left(6, "XXX").unwrap();
        overwrite(&mut s, 1, 11, "X");
        assert_eq!(s.to_string(), "aAXDl");
    }

    #[test]
    fn test_overwrite_content_only_keeps_inserts() {
        let mut s = MagicString::new("abcdefghijkl");
        s.append_left(1, "A").unwrap();
        s.prepend_right(1, "B").unwrap();
        s.append_left(11, "C").unwrap();
        s.prepend_right(11, "D").unwrap();
        s.overwrite(
            1,
            11,
            "X",
            OverwriteOptions {
                content_only: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(s.to_string(), "aABXCDl");
    }

    #[test]
    fn test_overwrite_content_only_keeps_interior_boundaries() {
        let mut s = MagicString::new("abcdefghijkl");
        s.prepend_right(1, "B").unwrap();
        s.append_left(6, "E").unwrap();
        s.prepend_right(6, "F").unwrap();
        s.append_left(11, "C").unwrap();
        s.update(1, 11, "X", OverwriteOptions::default()).unwrap();
        assert_eq!(s.to_string(), "aBFXECl");
    }

    #[test]
    fn test_overwrite_stores_name() {
        let mut s = MagicString::new("function Foo () {}");
        s.overwrite(
            9,
            12,
            "Bar",
            OverwriteOptions {
                store_name: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(s.to_string(), "function Bar () {}");
        assert_eq!(s.stored_names().collect::<Vec<_>>(), vec!["Foo"]);
    }

    #[test]
    fn test_stored_name_covers_split_range() {
        let mut s = MagicString::new("function Foo () {}");
        s.append_left(10, "").unwrap();
        s.overwrite(
            9,
            12,
            "Bar",
            OverwriteOptions {
                store_name: true,
                ..Default::default()
            },
        )
        .unwrap();

        let replaced: Vec<_> = s.chunks().filter(|c| c.edited).collect();
        assert_eq!(replaced.len(), 2);
        assert_eq!((replaced[0].start, replaced[0].end), (9, 10));
        assert_eq!(replaced[0].name, Some("Foo"));
        assert!(replaced[0].store_name);
        assert_eq!(replaced[1].name, None);

        s.reset(9, 12).unwrap();
        assert!(s.chunks().all(|c| c.name.is_none()));
    }

    #[test]
    fn test_overwrite_twice_fails() {
        let mut s = MagicString::new("abcdefghijkl");
        overwrite(&mut s, 3, 6, "X");

        let err = s
            .overwrite(2, 8, "Y", OverwriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, MagicStringError::DoubleEdit { start: 2, end: 8, .. }));

        // Partial overlap is caught before any split happens
        let err = s
            .overwrite(4, 9, "Y", OverwriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, MagicStringError::DoubleEdit { .. }));
        assert_eq!(s.to_string(), "abcXghijkl");
        assert_eq!(original_order(&s), vec![(0, 3), (3, 6), (6, 12)]);
    }

    #[test]
    fn test_overwrite_removed_range_is_allowed() {
        let mut s = MagicString::new("abcdefghijkl");
        s.remove(3, 6).unwrap();
        overwrite(&mut s, 2, 8, "Z");
        assert_eq!(s.to_string(), "abZijkl");
    }

    #[test]
    fn test_overwrite_across_moved_content_fails() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(6, 9, 3).unwrap();
        assert_eq!(s.to_string(), "abcghidefjkl");

        let err = s
            .overwrite(5, 7, "XX", OverwriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, MagicStringError::DiscontiguousOverwrite));
        assert_eq!(s.to_string(), "abcghidefjkl");
    }

    #[test]
    fn test_overwrite_out_of_bounds() {
        let mut s = MagicString::new("abc");
        assert!(matches!(
            s.overwrite(1, 5, "x", OverwriteOptions::default()),
            Err(MagicStringError::OutOfBounds { index: 5, .. })
        ));
        assert!(matches!(
            s.overwrite(2, 1, "x", OverwriteOptions::default()),
            Err(MagicStringError::InvalidRange { start: 2, end: 1 })
        ));
    }

    #[test]
    fn test_remove() {
        let mut s = MagicString::new("abcdefghijkl");
        s.remove(1, 5).unwrap();
        assert_eq!(s.to_string(), "afghijkl");
        s.remove(9, 12).unwrap();
        assert_eq!(s.to_string(), "afghi");
    }

    #[test]
    fn test_remove_empty_and_inverted_ranges() {
        let mut s = MagicString::new("abcdef");
        s.remove(3, 3).unwrap();
        s.remove(4, 2).unwrap();
        assert_eq!(s.to_string(), "abcdef");
        assert_eq!(original_order(&s), vec![(0, 6)]);
    }

    #[test]
    fn test_remove_interior_inserts() {
        let mut s = MagicString::new("abcdefghijkl");
        s.append_left(1, "A").unwrap();
        s.prepend_right(1, "B").unwrap();
        s.append_left(11, "C").unwrap();
        s.prepend_right(11, "D").unwrap();
        s.remove(1, 11).unwrap();
        assert_eq!(s.to_string(), "aADl");
    }

    #[test]
    fn test_remove_overlapping_ranges() {
        let mut s = MagicString::new("abcdefghijkl");
        s.remove(3, 7).unwrap();
        s.remove(5, 9).unwrap();
        s.remove(0, 12).unwrap();
        assert_eq!(s.to_string(), "");
    }

    #[test]
    fn test_remove_ignores_move_order() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(6, 9, 0).unwrap();
        assert_eq!(s.to_string(), "ghiabcdefjkl");
        s.remove(5, 7).unwrap();
        assert_eq!(s.to_string(), "hiabcdejkl");
    }

    #[test]
    fn test_reset() {
        let mut s = MagicString::new("abcdefghijkl");
        overwrite(&mut s, 2, 4, "XX");
        s.remove(6, 9).unwrap();
        s.append_left(10, "!").unwrap();
        assert_eq!(s.to_string(), "abXXefj!kl");

        s.reset(0, 12).unwrap();
        assert_eq!(s.to_string(), "abcdefghijkl");
        assert!(!s.has_changed());
    }

    #[test]
    fn test_move() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(0, 3, 6).unwrap();
        assert_eq!(s.to_string(), "defabcghijkl");
        assert_eq!(render_order(&s), vec![(3, 6), (0, 3), (6, 12)]);
        assert_eq!(original_order(&s), vec![(0, 3), (3, 6), (6, 12)]);

        // Lands before "abc", which itself renders after "def"
        s.move_to(9, 12, 0).unwrap();
        assert_eq!(s.to_string(), "defjklabcghi");
    }

    #[test]
    fn test_move_to_end() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(0, 3, 12).unwrap();
        assert_eq!(s.to_string(), "defghijklabc");
        s.move_to(3, 6, 12).unwrap();
        assert_eq!(s.to_string(), "ghijklabcdef");
    }

    #[test]
    fn test_move_lands_before_chunk_starting_at_index() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(6, 9, 3).unwrap();
        assert_eq!(s.to_string(), "abcghidefjkl");

        // "ghi" now renders before "def", so the chunk ending at 6 does not
        // precede the one starting at 6
        s.move_to(0, 2, 6).unwrap();
        assert_eq!(s.to_string(), "cabghidefjkl");
        assert_eq!(
            render_order(&s),
            vec![(2, 3), (0, 2), (6, 9), (3, 6), (9, 12)]
        );
    }

    #[test]
    fn test_move_inside_itself_fails() {
        let mut s = MagicString::new("abcdefghijkl");
        for index in [3, 4, 6] {
            assert!(matches!(
                s.move_to(3, 6, index),
                Err(MagicStringError::IllegalMove)
            ));
        }
        assert_eq!(original_order(&s), vec![(0, 12)]);

        s.move_to(3, 6, 9).unwrap();
        assert_eq!(s.to_string(), "abcghidefjkl");
        s.move_to(3, 6, 9).unwrap();
        assert_eq!(s.to_string(), "abcghidefjkl");
        s.move_to(3, 6, 12).unwrap();
        assert_eq!(s.to_string(), "abcghijkldef");
    }

    #[test]
    fn test_move_keeps_inserts_attached() {
        let mut s = MagicString::new("abcdefghijkl");
        s.prepend_right(3, "(").unwrap();
        s.append_left(6, ")").unwrap();
        s.append_left(3, "|").unwrap();
        s.move_to(3, 6, 9).unwrap();
        assert_eq!(s.to_string(), "abc|ghi(def)jkl");
    }

    #[test]
    fn test_move_keeps_inner_render_order() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(1, 2, 5).unwrap();
        assert_eq!(s.to_string(), "acdebfghijkl");
        s.move_to(0, 6, 9).unwrap();
        assert_eq!(s.to_string(), "ghiacdebfjkl");
        render_order(&s);
    }

    #[test]
    fn test_move_then_edit_moved_content() {
        let mut s = MagicString::new("abcdefghijkl");
        s.move_to(3, 6, 9).unwrap();
        overwrite(&mut s, 4, 5, "E");
        assert_eq!(s.to_string(), "abcghidEfjkl");
    }

    #[test]
    fn test_snip() {
        let mut s = MagicString::new("abcdefghijkl");
        overwrite(&mut s, 4, 6, "X");
        let snipped = s.snip(2, 8).unwrap();
        assert_eq!(snipped.to_string(), "cdXgh");
        assert_eq!(s.to_string(), "abcdXghijkl");
    }

    #[test]
    fn test_replace() {
        let mut s = MagicString::new("one two one");
        s.replace("one", "1").unwrap();
        assert_eq!(s.to_string(), "1 two one");

        let mut s = MagicString::new("one two one");
        s.replace_all("one", "1").unwrap();
        assert_eq!(s.to_string(), "1 two 1");
    }

    #[test]
    fn test_replace_regex_expands_groups() {
        let mut s = MagicString::new("let a = 1; let b = 2;");
        let re = regex::Regex::new(r"let (\w+)").unwrap();
        s.replace_regex(&re, "const $1").unwrap();
        assert_eq!(s.to_string(), "const a = 1; const b = 2;");
    }

    #[test]
    fn test_failed_replace_all_leaves_buffer_unchanged() {
        let mut s = MagicString::new("aaa bbb aaa");
        overwrite(&mut s, 8, 11, "ccc");
        assert!(s.replace_all("aaa", "x").is_err());
        assert_eq!(s.to_string(), "aaa bbb ccc");
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_aliases() {
        let mut s = MagicString::new("abc");
        s.insert_left(1, "<").unwrap();
        s.insert_right(1, ">").unwrap();
        assert_eq!(s.to_string(), "a<>bc");
    }
}
