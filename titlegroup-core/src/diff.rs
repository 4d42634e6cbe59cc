//! Word-level diff between two titles.
//!
//! Titles are split into word runs, whitespace runs and punctuation, then
//! aligned with a Myers shortest edit script. Whitespace runs always compare
//! equal to each other, so re-spacing a title is not a change.

use crate::types::{DiffSegment, SegmentKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Space,
    /// Newlines, brackets and quotes are always single-character tokens
    Special,
    Word,
    Other,
}

fn classify(c: char) -> TokenClass {
    match c {
        '\r' | '\n' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' => TokenClass::Special,
        c if c.is_whitespace() => TokenClass::Space,
        c if c.is_ascii_alphanumeric() || c == '_' => TokenClass::Word,
        _ => TokenClass::Other,
    }
}

/// Latin letters, including the accented ranges, that glue word pieces together
fn is_extended_word_char(c: char) -> bool {
    matches!(c,
        'a'..='z'
        | 'A'..='Z'
        | '\u{C0}'..='\u{FF}'
        | '\u{100}'..='\u{2C6}'
        | '\u{2C8}'..='\u{2D7}'
        | '\u{2DE}'..='\u{2FF}'
        | '\u{1E00}'..='\u{1EFF}')
}

fn is_extended_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_extended_word_char)
}

fn is_blank(token: &str) -> bool {
    token.chars().all(char::is_whitespace)
}

/// Split a title into diff tokens. Concatenating the tokens gives back the input.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut spans: Vec<(usize, usize, TokenClass)> = Vec::new();

    for (index, c) in text.char_indices() {
        let class = classify(c);
        let end = index + c.len_utf8();
        match spans.last_mut() {
            Some((_, last_end, last_class))
                if *last_class == class && class != TokenClass::Special =>
            {
                *last_end = end;
            }
            _ => spans.push((index, end, class)),
        }
    }

    // Rejoin word pieces split at the ASCII boundary, e.g. "caf" + "é"
    let mut i = 0;
    while i + 1 < spans.len() {
        let (start, end, class) = spans[i];
        let (next_start, next_end, next_class) = spans[i + 1];
        let joinable = matches!(class, TokenClass::Word | TokenClass::Other)
            && matches!(next_class, TokenClass::Word | TokenClass::Other)
            && is_extended_word(&text[start..end])
            && is_extended_word(&text[next_start..next_end]);

        if joinable {
            spans[i] = (start, next_end, TokenClass::Word);
            spans.remove(i + 1);
        } else {
            i += 1;
        }
    }

    spans
        .into_iter()
        .map(|(start, end, _)| &text[start..end])
        .collect()
}

fn tokens_equal(left: &str, right: &str) -> bool {
    left == right || (is_blank(left) && is_blank(right))
}

/// Diff `prev` into `cur` at word granularity.
///
/// Shortest edit script over word tokens (forward Myers). Where two scripts
/// are equally short, the path reaching further into `prev` wins, and ties
/// go to the removal. Within a changed region removals are reported before
/// additions. Equal segments carry the text of `cur`.
pub fn diff_words(prev: &str, cur: &str) -> Vec<DiffSegment> {
    let old = tokenize(prev);
    let new = tokenize(cur);

    let components = shortest_edit(&old, &new);
    let mut segments = build_segments(&components, &old, &new);

    // A whitespace-only change at the very end is folded into the segment before it
    if segments.len() > 1 {
        let trailing_blank_change = segments
            .last()
            .map(|last| last.is_change() && is_blank(&last.value))
            .unwrap_or(false);
        if trailing_blank_change {
            if let Some(last) = segments.pop() {
                if let Some(previous) = segments.last_mut() {
                    previous.value.push_str(&last.value);
                }
            }
        }
    }

    segments
}

/// A run of tokens of one kind along an edit path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Component {
    kind: SegmentKind,
    count: usize,
}

/// Furthest-reaching path on one diagonal (`old_pos - new_pos`)
#[derive(Debug, Clone)]
struct EditPath {
    /// Index of the last consumed `old` token, -1 before the first
    old_pos: isize,
    components: Vec<Component>,
}

impl EditPath {
    fn step(mut self, kind: SegmentKind) -> Self {
        if kind == SegmentKind::Removed {
            self.old_pos += 1;
        }
        match self.components.last_mut() {
            Some(last) if last.kind == kind => last.count += 1,
            _ => self.components.push(Component { kind, count: 1 }),
        }
        self
    }

    /// Slide down the diagonal over equal tokens; returns the new `new_pos`
    fn follow_common(&mut self, old: &[&str], new: &[&str], diagonal: isize) -> isize {
        let mut old_pos = self.old_pos;
        let mut new_pos = old_pos - diagonal;
        let mut common = 0;

        while new_pos + 1 < new.len() as isize
            && old_pos + 1 < old.len() as isize
            && tokens_equal(new[(new_pos + 1) as usize], old[(old_pos + 1) as usize])
        {
            new_pos += 1;
            old_pos += 1;
            common += 1;
        }

        if common > 0 {
            self.components.push(Component {
                kind: SegmentKind::Equal,
                count: common,
            });
        }
        self.old_pos = old_pos;
        new_pos
    }
}

fn shortest_edit(old: &[&str], new: &[&str]) -> Vec<Component> {
    let old_len = old.len() as isize;
    let new_len = new.len() as isize;

    let mut seed = EditPath {
        old_pos: -1,
        components: Vec::new(),
    };
    let new_pos = seed.follow_common(old, new, 0);
    if seed.old_pos + 1 >= old_len && new_pos + 1 >= new_len {
        return vec![Component {
            kind: SegmentKind::Equal,
            count: new.len(),
        }];
    }

    let max_edit = old_len + new_len;
    let offset = max_edit + 1;
    let mut best: Vec<Option<EditPath>> = vec![None; (2 * offset + 1) as usize];
    best[offset as usize] = Some(seed);

    // Once a path touches the end of `old` (or `new`), diagonals beyond it
    // cannot finish sooner and are skipped
    let mut min_diagonal = isize::MIN;
    let mut max_diagonal = isize::MAX;

    for edit_length in 1..=max_edit {
        let mut diagonal = min_diagonal.max(-edit_length);
        while diagonal <= max_diagonal.min(edit_length) {
            let slot = (diagonal + offset) as usize;

            let remove_path = best[slot - 1]
                .take()
                .filter(|path| path.old_pos + 1 < old_len);
            let add_path = best[slot + 1].as_ref().filter(|path| {
                let new_pos = path.old_pos - diagonal;
                0 <= new_pos && new_pos < new_len
            });

            let next = match (add_path, remove_path) {
                (None, None) => None,
                (Some(add), Some(remove)) if remove.old_pos + 1 < add.old_pos => {
                    Some(add.clone().step(SegmentKind::Added))
                }
                (Some(add), None) => Some(add.clone().step(SegmentKind::Added)),
                (_, Some(remove)) => Some(remove.step(SegmentKind::Removed)),
            };

            let Some(mut path) = next else {
                best[slot] = None;
                diagonal += 2;
                continue;
            };

            let new_pos = path.follow_common(old, new, diagonal);
            let old_done = path.old_pos + 1 >= old_len;
            let new_done = new_pos + 1 >= new_len;
            if old_done && new_done {
                return path.components;
            }
            if old_done {
                max_diagonal = max_diagonal.min(diagonal - 1);
            }
            if new_done {
                min_diagonal = min_diagonal.max(diagonal + 1);
            }
            best[slot] = Some(path);
            diagonal += 2;
        }
    }

    // Every pair of token lists is reachable within old_len + new_len edits
    [
        (SegmentKind::Removed, old.len()),
        (SegmentKind::Added, new.len()),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(kind, count)| Component { kind, count })
    .collect()
}

/// Attach token text to each component. A removal that directly follows an
/// addition is moved in front of it.
fn build_segments(components: &[Component], old: &[&str], new: &[&str]) -> Vec<DiffSegment> {
    let mut segments: Vec<DiffSegment> = Vec::with_capacity(components.len());
    let mut old_pos = 0;
    let mut new_pos = 0;

    for component in components {
        let count = component.count;
        let value = match component.kind {
            SegmentKind::Removed => {
                let value = old[old_pos..old_pos + count].concat();
                old_pos += count;
                value
            }
            SegmentKind::Added => {
                let value = new[new_pos..new_pos + count].concat();
                new_pos += count;
                value
            }
            SegmentKind::Equal => {
                let value = new[new_pos..new_pos + count].concat();
                new_pos += count;
                old_pos += count;
                value
            }
        };
        segments.push(DiffSegment::new(component.kind, value, count));

        let len = segments.len();
        if component.kind == SegmentKind::Removed
            && len > 1
            && segments[len - 2].kind == SegmentKind::Added
        {
            segments.swap(len - 2, len - 1);
        }
    }

    segments
}
