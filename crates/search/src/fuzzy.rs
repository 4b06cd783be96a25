//! Fuzzy matching algorithms.

use unicode_segmentation::UnicodeSegmentation;

/// Calculate Levenshtein edit distance between two strings.
///
/// Distances are measured in grapheme clusters, so a single accented
/// character counts as one edit regardless of its code-point encoding.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits (insert, delete, substitute) needed to
/// transform `a` into `b`
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_graphemes: Vec<&str> = a.graphemes(true).collect();
    let b_graphemes: Vec<&str> = b.graphemes(true).collect();

    let m = a_graphemes.len();
    let n = b_graphemes.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_graphemes[i - 1] != b_graphemes[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Truncate `text` to its first `max_len` grapheme clusters.
///
/// Bounds the fuzzy comparison: distances are computed against a short
/// prefix of the field rather than the whole string.
pub(crate) fn prefix_window(text: &str, max_len: usize) -> &str {
    match text.grapheme_indices(true).nth(max_len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
