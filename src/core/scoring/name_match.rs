// src/core/scoring/name_match.rs

/// Lowercase and strip everything that is not a letter, so that punctuation,
/// spacing and case differences never affect the comparison.
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Containment/overlap similarity between two names, as a 0-100 percentage.
///
/// Equal normalized names score 100; one containing the other scores 85;
/// otherwise the score is the share of characters of one name that also
/// appear in the other, over the longer length. This is a crude heuristic,
/// not an edit distance: "MARY" vs "ARMY" scores 100 on the overlap branch
/// only because every character of one appears somewhere in the other.
pub fn name_match(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() && b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }
    if a.contains(&b) || b.contains(&a) {
        return 85;
    }

    let longer = a.len().max(b.len());
    let b_chars: std::collections::HashSet<char> = b.chars().collect();
    let overlap = a.chars().filter(|c| b_chars.contains(c)).count();

    ((overlap as f64 / longer as f64) * 100.0).round() as u8
}
