/// Minimum number of single-character insertions, deletions and substitutions
/// needed to turn `s` into `t`.
///
/// Works on `char`s, so Cyrillic surnames count one edit per letter rather than
/// one per UTF-8 byte. Memory is two rows sized by the shorter string.
///
/// # Example
/// ```
/// use teacher_finder_bot::utils::edit_distance::distance;
///
/// assert_eq!(distance("Петров", "Петрв"), 1);
/// assert_eq!(distance("", "abc"), 3);
/// ```
pub fn distance(s: &str, t: &str) -> usize {
    let s: Vec<char> = s.chars().collect();
    let t: Vec<char> = t.chars().collect();

    // Keep the longer string on the outer loop so the rows stay short.
    let (long, short) = if s.len() < t.len() { (&t, &s) } else { (&s, &t) };

    if short.is_empty() {
        return long.len();
    }

    let mut previous_row: Vec<usize> = (0..=short.len()).collect();
    let mut current_row = vec![0; short.len() + 1];

    for (i, c1) in long.iter().enumerate() {
        current_row[0] = i + 1;
        for (j, c2) in short.iter().enumerate() {
            let insertion = previous_row[j + 1] + 1;
            let deletion = current_row[j] + 1;
            let substitution = previous_row[j] + usize::from(c1 != c2);
            current_row[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut previous_row, &mut current_row);
    }

    previous_row[short.len()]
}
