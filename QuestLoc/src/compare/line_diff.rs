//! Line-level diff
//!
//! Longest-matching-block matcher: find the longest common run of lines,
//! recurse on both sides of it, then turn the matching blocks into opcodes.
//! When the new side has 200 or more lines, lines occurring in more than 1%
//! of it (plus one) are not used to seed matches, which keeps blank lines and
//! braces from anchoring unrelated regions.

use std::collections::HashMap;
use std::hash::Hash;

use super::types::{DiffLine, DiffLineKind, DiffStats, FileDiff, Hunk, OpTag, Opcode};

const AUTOJUNK_MIN_LEN: usize = 200;

/// A block of `size` equal items at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Sequence matcher over two slices.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    #[must_use]
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a`, then in
    /// `b`, wins. The block is widened over neighbouring equal lines that
    /// were excluded as too common.
    #[must_use]
    pub fn find_longest_match(&self, a_lo: usize, a_hi: usize, b_lo: usize, b_hi: usize) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in a_lo..a_hi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        while best_i > a_lo && best_j > b_lo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < a_hi
            && best_j + best_size < b_hi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// All matching blocks in order, adjacent blocks merged, followed by a
    /// zero-size sentinel at `(a.len(), b.len())`.
    #[must_use]
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
            let m = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if a_lo < m.a_start && b_lo < m.b_start {
                queue.push((a_lo, m.a_start, b_lo, m.b_start));
            }
            if m.a_start + m.size < a_hi && m.b_start + m.size < b_hi {
                queue.push((m.a_start + m.size, a_hi, m.b_start + m.size, b_hi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            if let Some(last) = merged.last_mut()
                && last.a_start + last.size == block.a_start
                && last.b_start + last.size == block.b_start
            {
                last.size += block.size;
            } else {
                merged.push(block);
            }
        }
        merged.push(Match {
            a_start: self.a.len(),
            b_start: self.b.len(),
            size: 0,
        });
        merged
    }

    /// Edit operations turning `a` into `b`.
    #[must_use]
    pub fn opcodes(&self) -> Vec<Opcode> {
        let (mut i, mut j) = (0, 0);
        let mut codes = Vec::new();

        for m in self.matching_blocks() {
            let tag = match (i < m.a_start, j < m.b_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                codes.push(Opcode::new(tag, i, m.a_start, j, m.b_start));
            }
            i = m.a_start + m.size;
            j = m.b_start + m.size;
            if m.size > 0 {
                codes.push(Opcode::new(OpTag::Equal, m.a_start, i, m.b_start, j));
            }
        }
        codes
    }

    /// Opcodes grouped into hunks with up to `context` equal lines around
    /// each change. Identical inputs produce no groups.
    #[must_use]
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            codes.push(Opcode::new(OpTag::Equal, 0, 1, 0, 1));
        }

        if let Some(first) = codes.first_mut()
            && first.tag == OpTag::Equal
        {
            first.a_start = first.a_start.max(first.a_end.saturating_sub(context));
            first.b_start = first.b_start.max(first.b_end.saturating_sub(context));
        }
        if let Some(last) = codes.last_mut()
            && last.tag == OpTag::Equal
        {
            last.a_end = last.a_end.min(last.a_start + context);
            last.b_end = last.b_end.min(last.b_start + context);
        }

        let mut groups = Vec::new();
        let mut group = Vec::new();
        for mut code in codes {
            if code.tag == OpTag::Equal && code.a_end - code.a_start > context * 2 {
                group.push(Opcode::new(
                    OpTag::Equal,
                    code.a_start,
                    code.a_end.min(code.a_start + context),
                    code.b_start,
                    code.b_end.min(code.b_start + context),
                ));
                groups.push(std::mem::take(&mut group));
                code.a_start = code.a_start.max(code.a_end.saturating_sub(context));
                code.b_start = code.b_start.max(code.b_end.saturating_sub(context));
            }
            group.push(code);
        }
        if !(group.is_empty() || group.len() == 1 && group[0].tag == OpTag::Equal) {
            groups.push(group);
        }
        groups
    }
}

/// Added/removed line totals over a set of opcodes.
#[must_use]
pub fn diff_stats(opcodes: &[Opcode]) -> DiffStats {
    let mut stats = DiffStats::default();
    for code in opcodes {
        match code.tag {
            OpTag::Replace => {
                stats.removed += code.a_end - code.a_start;
                stats.added += code.b_end - code.b_start;
            }
            OpTag::Delete => stats.removed += code.a_end - code.a_start,
            OpTag::Insert => stats.added += code.b_end - code.b_start,
            OpTag::Equal => {}
        }
    }
    stats
}

/// Split text into lines the way a text-mode reader does: `\r\n` and `\r`
/// become `\n`, and each line keeps its trailing `\n`.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split_inclusive('\n')
        .map(str::to_string)
        .collect()
}

/// Diff two texts line by line.
#[must_use]
pub fn diff_texts(old: &str, new: &str, context: usize) -> FileDiff {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let matcher = SequenceMatcher::new(&old_lines, &new_lines);

    let stats = diff_stats(&matcher.opcodes());
    let hunks = matcher
        .grouped_opcodes(context)
        .iter()
        .map(|group| build_hunk(group, &old_lines, &new_lines))
        .collect();

    FileDiff { stats, hunks }
}

fn build_hunk(group: &[Opcode], old: &[String], new: &[String]) -> Hunk {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return Hunk {
            header: String::new(),
            lines: Vec::new(),
        };
    };
    let header = format!(
        "@@ -{} +{} @@",
        unified_range(first.a_start, last.a_end),
        unified_range(first.b_start, last.b_end)
    );

    let mut lines = Vec::new();
    for code in group {
        if code.tag == OpTag::Equal {
            for (offset, text) in old[code.a_start..code.a_end].iter().enumerate() {
                lines.push(DiffLine {
                    kind: DiffLineKind::Context,
                    old_line: Some(code.a_start + offset + 1),
                    new_line: Some(code.b_start + offset + 1),
                    text: strip_newline(text),
                });
            }
            continue;
        }
        if matches!(code.tag, OpTag::Replace | OpTag::Delete) {
            for (index, text) in old.iter().enumerate().take(code.a_end).skip(code.a_start) {
                lines.push(DiffLine {
                    kind: DiffLineKind::Removed,
                    old_line: Some(index + 1),
                    new_line: None,
                    text: strip_newline(text),
                });
            }
        }
        if matches!(code.tag, OpTag::Replace | OpTag::Insert) {
            for (index, text) in new.iter().enumerate().take(code.b_end).skip(code.b_start) {
                lines.push(DiffLine {
                    kind: DiffLineKind::Added,
                    old_line: None,
                    new_line: Some(index + 1),
                    text: strip_newline(text),
                });
            }
        }
    }

    Hunk { header, lines }
}

/// Range in unified-diff notation: `start,length`, 1-based.
fn unified_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        1 => format!("{}", start + 1),
        0 => format!("{start},0"),
        _ => format!("{},{length}", start + 1),
    }
}

fn strip_newline(line: &str) -> String {
    line.strip_suffix('\n').unwrap_or(line).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_longest_match() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let m = SequenceMatcher::new(&a, &b).find_longest_match(0, 5, 0, 9);
        assert_eq!(m, Match { a_start: 0, b_start: 4, size: 5 });
    }

    #[test]
    fn test_matching_blocks() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![
                Match { a_start: 0, b_start: 0, size: 2 },
                Match { a_start: 3, b_start: 2, size: 2 },
                Match { a_start: 5, b_start: 4, size: 0 },
            ]
        );
    }

    #[test]
    fn test_opcodes() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let codes = SequenceMatcher::new(&a, &b).opcodes();
        assert_eq!(
            codes,
            vec![
                Opcode::new(OpTag::Delete, 0, 1, 0, 0),
                Opcode::new(OpTag::Equal, 1, 3, 0, 2),
                Opcode::new(OpTag::Replace, 3, 4, 2, 3),
                Opcode::new(OpTag::Equal, 4, 6, 3, 5),
                Opcode::new(OpTag::Insert, 6, 6, 5, 6),
            ]
        );
        assert_eq!(diff_stats(&codes), DiffStats { added: 2, removed: 2 });
    }

    #[test]
    fn test_identical_has_no_hunks() {
        let diff = diff_texts("a\nb\n", "a\nb\n", 2);
        assert!(diff.hunks.is_empty());
        assert_eq!(diff.stats, DiffStats::default());
    }

    #[test]
    fn test_hunks_with_context() {
        let old: String = (1..=20).map(|n| format!("line {n}\n")).collect();
        let new = old.replace("line 5\n", "line five\n").replace("line 17\n", "");
        let diff = diff_texts(&old, &new, 2);

        assert_eq!(diff.stats, DiffStats { added: 1, removed: 2 });
        assert_eq!(diff.hunks.len(), 2);
        assert_eq!(diff.hunks[0].header, "@@ -3,5 +3,5 @@");
        assert_eq!(diff.hunks[1].header, "@@ -15,5 +15,4 @@");

        let first = &diff.hunks[0].lines;
        assert_eq!(first[0].old_line, Some(3));
        assert_eq!(first[2].kind, DiffLineKind::Removed);
        assert_eq!(first[2].text, "line 5");
        assert_eq!(first[3].kind, DiffLineKind::Added);
        assert_eq!(first[3].new_line, Some(5));
        assert_eq!(first[4].old_line, Some(6));
    }

    #[test]
    fn test_insert_into_empty() {
        let diff = diff_texts("", "new\n", 2);
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.hunks[0].header, "@@ -0,0 +1 @@");
    }

    #[test]
    fn test_popular_lines_do_not_seed() {
        let mut old: Vec<String> = vec!["}\n".to_string(); 250];
        old.push("unique\n".to_string());
        let new = old.clone();
        let matcher = SequenceMatcher::new(&old, &new);
        // "}" occurs far more than 1% of the time, but the unique line still
        // anchors a match that is then extended over the braces.
        let m = matcher.find_longest_match(0, old.len(), 0, new.len());
        assert_eq!(m.size, old.len());
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(split_lines("a\r\nb"), vec!["a\n", "b"]);
    }
}
