use crate::utils::edit_distance::distance;

/// Returns the candidate with the smallest edit distance to `target`.
///
/// Candidates are scanned once in iteration order and a later candidate only
/// replaces the current best when it is strictly closer, so ties always go to
/// the earliest one. Returns `None` for an empty candidate list.
pub fn closest<'a, I>(candidates: I, target: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        let d = distance(candidate, target);
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((candidate, d)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
