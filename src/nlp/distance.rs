//! Levenshtein edit distance
//!
//! Used as the edge weight between candidate keywords, so values must be
//! exact: ranking ties depend on them.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `first` into `second`.
///
/// Works on `char`s with a single rolling row sized by the shorter string.
pub fn levenshtein(first: &str, second: &str) -> usize {
    let (short, long) = if first.chars().count() > second.chars().count() {
        (second, first)
    } else {
        (first, second)
    };

    let short: Vec<char> = short.chars().collect();
    let mut distances: Vec<usize> = (0..=short.len()).collect();
    let mut next = Vec::with_capacity(short.len() + 1);

    for (j, long_char) in long.chars().enumerate() {
        next.clear();
        next.push(j + 1);
        for (i, &short_char) in short.iter().enumerate() {
            let cost = if short_char == long_char {
                distances[i]
            } else {
                1 + distances[i].min(distances[i + 1]).min(next[i])
            };
            next.push(cost);
        }
        std::mem::swap(&mut distances, &mut next);
    }

    distances[short.len()]
}
