//! Record assembly.
//!
//! Accumulates lines into one record blob until a stop condition fires,
//! tracking open-parenthesis depth so that record-start-shaped fragments
//! inside an unclosed parenthetical aside never terminate the record.
//! Boilerplate-flagged lines are consumed but contribute neither text nor
//! parenthesis depth.

use regex::Regex;

use crate::parser::layout::Line;

/// Result of assembling one record blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    /// Accumulated text, lines joined by single spaces.
    pub blob: String,
    /// Index of the line that fired the stop condition, or the scope bound.
    pub next: usize,
}

/// Accumulate a blob from `start` (inclusive) up to `bound` (exclusive).
///
/// `stop_header` is evaluated on every candidate line; `stop_record` only
/// while the running parenthesis depth is zero. Both predicates receive
/// the candidate line's stream index, so stop conditions that need their
/// own lookahead (wrapped names completing an anchor on a later line) can
/// peek without touching the accumulation state.
pub fn assemble<H, R>(
    lines: &[Line],
    start: usize,
    bound: usize,
    stop_header: H,
    stop_record: R,
) -> Assembled
where
    H: Fn(usize, &Line) -> bool,
    R: Fn(usize, &Line) -> bool,
{
    let mut blob = String::new();
    let mut depth: usize = 0;

    if let Some(first) = lines.get(start) {
        blob.push_str(first.trimmed());
        depth = bump_depth(depth, first.trimmed());
    }

    let mut i = start + 1;
    while i < bound.min(lines.len()) {
        let line = &lines[i];
        if line.skip {
            i += 1;
            continue;
        }
        if stop_header(i, line) {
            break;
        }
        if depth == 0 && stop_record(i, line) {
            break;
        }

        if !blob.is_empty() {
            blob.push(' ');
        }
        blob.push_str(line.trimmed());
        depth = bump_depth(depth, line.trimmed());
        i += 1;
    }

    Assembled { blob, next: i }
}

fn bump_depth(depth: usize, text: &str) -> usize {
    let mut depth = depth;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// Bounded lookahead for wrapped headers.
///
/// Starting at `start`, merges the text of up to `max_lookahead` following
/// lines accepted by `accept` (skip-flagged lines are passed over without
/// spending lookahead budget) until `pattern` matches the merged text.
/// Returns the merged text and the offset of the last merged line relative
/// to `start`, so the caller knows how far the header extends. Pure: no
/// scan state is touched.
pub fn try_extend_header<A>(
    lines: &[Line],
    start: usize,
    max_lookahead: usize,
    pattern: &Regex,
    accept: A,
) -> Option<(String, usize)>
where
    A: Fn(&Line) -> bool,
{
    let first = lines.get(start)?;
    let mut merged = first.trimmed().to_string();
    if pattern.is_match(&merged) {
        return Some((merged, 0));
    }

    let mut taken = 0;
    let mut i = start + 1;
    while taken < max_lookahead && i < lines.len() {
        let line = &lines[i];
        if line.skip {
            i += 1;
            continue;
        }
        if !accept(line) {
            return None;
        }
        merged.push(' ');
        merged.push_str(line.trimmed());
        taken += 1;
        if pattern.is_match(&merged) {
            return Some((merged, i - start));
        }
        i += 1;
    }
    None
}
