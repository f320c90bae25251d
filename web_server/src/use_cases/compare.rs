use std::collections::BTreeSet;

use crate::domain::Comparison;

// Compare two texts as lower-cased word sets.
pub fn compare_texts(left: &str, right: &str) -> Comparison {
    let left_words = word_set(left);
    let right_words = word_set(right);

    let common_words: Vec<String> = left_words.intersection(&right_words).cloned().collect();
    let only_left: Vec<String> = left_words.difference(&right_words).cloned().collect();
    let only_right: Vec<String> = right_words.difference(&left_words).cloned().collect();

    let larger = left_words.len().max(right_words.len());
    let similarity = if larger == 0 {
        0.0
    } else {
        common_words.len() as f64 / larger as f64
    };

    Comparison {
        similarity,
        common_words,
        only_left,
        only_right,
    }
}

fn word_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
