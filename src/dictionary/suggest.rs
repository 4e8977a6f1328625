//! Morphological variants for the similar-words probe.

/// The fixed candidate list for a word with no direct definition: `+s`,
/// `+ed`, `+ing`, drop-last-1 (only when longer than 3 characters), and
/// drop-last-2 (only when longer than 4). Order matters: suggestions are
/// reported in probe order, so the list must stay exactly this sequence.
pub fn spelling_variants(word: &str) -> Vec<String> {
    vec![
        format!("{word}s"),
        format!("{word}ed"),
        format!("{word}ing"),
        drop_last(word, 1, 3),
        drop_last(word, 2, 4),
    ]
}

/// Drop `count` characters from the end, or return the word unchanged when
/// it has `min_length` characters or fewer. Counts characters rather than
/// bytes so multi-byte words cannot split a code point.
fn drop_last(word: &str, count: usize, min_length: usize) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() > min_length {
        chars[..chars.len() - count].iter().collect()
    } else {
        word.to_string()
    }
}
