//! Text chunking and page-count arithmetic.

/// Split a text into ordered fragments of at most `max_chars` characters.
///
/// An empty input yields no fragments rather than a single empty one.
/// Splits are position-based only, so a fragment may end mid-word, but
/// always on a character boundary. Concatenating the fragments in order
/// reproduces the input exactly.
#[must_use]
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.chars()
        .collect::<Vec<char>>()
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Number of pages needed to show `total_items` at `items_per_page` per page.
///
/// An empty result still occupies one page, so `total_items == 0` yields 1.
/// `items_per_page` must be positive.
#[must_use]
pub fn page_count(total_items: usize, items_per_page: usize) -> usize {
    if total_items == 0 {
        return 1;
    }
    ((total_items - 1) / items_per_page) + 1
}

/// Truncate a text to at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_fragments() {
        assert!(split_chunks("", 4096).is_empty());
        assert!(split_chunks("", 1).is_empty());
    }

    #[test]
    fn fragments_reassemble_exactly() {
        for max in [1, 2, 3, 7, 100] {
            for text in ["a", "hello world", "ab cd ef gh", "é日本語 mixed ascii"] {
                let chunks = split_chunks(text, max);
                assert_eq!(chunks.concat(), text, "max={max} text={text}");
                for chunk in &chunks {
                    assert!(chunk.chars().count() <= max);
                }
            }
        }
    }

    #[test]
    fn fragment_count_is_ceiling_of_length() {
        let text = "x".repeat(10);
        assert_eq!(split_chunks(&text, 3).len(), 4);
        assert_eq!(split_chunks(&text, 5).len(), 2);
        assert_eq!(split_chunks(&text, 10).len(), 1);
        assert_eq!(split_chunks(&text, 11).len(), 1);
    }

    #[test]
    fn long_answer_splits_into_expected_lengths() {
        let text = "a".repeat(10_000);
        let chunks = split_chunks(&text, 4096);
        let lengths: Vec<usize> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![4096, 4096, 1808]);
    }

    #[test]
    fn splits_on_character_boundaries() {
        let text = "ééé";
        let chunks = split_chunks(text, 2);
        assert_eq!(chunks, vec!["éé".to_string(), "é".to_string()]);
    }

    #[test]
    fn zero_items_still_occupy_one_page() {
        assert_eq!(page_count(0, 1), 1);
        assert_eq!(page_count(0, 25), 1);
    }

    #[test]
    fn page_count_matches_ceiling_division() {
        assert_eq!(page_count(1, 1), 1);
        assert_eq!(page_count(3, 1), 3);
        assert_eq!(page_count(10, 3), 4);
        assert_eq!(page_count(9, 3), 3);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn truncate_respects_character_boundaries() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 5), "");
    }
}
