//! Line and character helpers shared by the differ and the player.
//!
//! Lines are stored without trailing newlines; the terminator is
//! implicit. All widths and offsets are counted in characters, not
//! bytes, so multi-byte text replays correctly.

/// Split snapshot text into lines, dropping line terminators.
///
/// A missing final newline is normalised away: `"a\nb"` and `"a\nb\n"`
/// produce the same lines.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Whether a line contains only whitespace (or nothing)
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Width of the leading whitespace in characters
#[must_use]
pub fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Length of a string in characters
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Slice a string by character offsets.
///
/// Offsets past the end clamp to the end, and an inverted range
/// collapses to empty.
#[must_use]
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let total = char_len(s);
    let start = start.min(total);
    let end = end.clamp(start, total);
    &s[char_boundary(s, start)..char_boundary(s, end)]
}

/// Number of characters the two strings share at the front
#[must_use]
pub fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Number of characters the two strings share at the back, at most `max`
#[must_use]
pub fn common_suffix_chars(a: &str, b: &str, max: usize) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take(max)
        .take_while(|(x, y)| x == y)
        .count()
}

/// Split `total` into chunk sizes of at most `group`, largest first.
///
/// A zero group width is treated as 1.
#[must_use]
pub fn chunk_sizes(total: usize, group: usize) -> Vec<usize> {
    let group = group.max(1);
    let mut sizes = Vec::new();
    let mut remaining = total;
    while remaining > 0 {
        let take = remaining.min(group);
        sizes.push(take);
        remaining -= take;
    }
    sizes
}

fn char_boundary(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(offset, _)| offset)
}
