//! Page provider contract and the answer page source backing it.

use super::chunk::{page_count, split_chunks, truncate_chars};

/// Discord embed description limit; caps each answer fragment.
pub const ANSWER_PAGE_CHARS: usize = 4096;
/// Discord embed field value limit; caps each thought fragment.
pub const THOUGHT_PAGE_CHARS: usize = 1024;

const FIELD_CHARS: usize = 1024;

/// The thought-process section of a page, with its per-part heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtSection {
    pub heading: String,
    pub text: String,
}

/// One renderable unit: an answer fragment, the aligned thought fragment,
/// and the fixed auxiliary fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub colour: u32,
    pub body: String,
    pub thought: Option<ThoughtSection>,
    pub question: String,
    pub sources: String,
    /// `"Page i from n"` when there is more than one page.
    pub footer: Option<String>,
}

/// Produces the page at a 1-based index together with the total page count.
///
/// Implementations must be deterministic for a fixed index while the
/// underlying content is unchanged, and must degrade to empty content rather
/// than fail when an index runs past a fragment sequence.
pub trait PageProvider: Send + Sync {
    fn get_page(&self, index: usize) -> (Page, usize);
}

/// Page source over a chunked answer and its chunked thought trace.
///
/// The answer and thought sequences are chunked once at construction and
/// never mutated; pages are derived views over them.
pub struct AnswerPages {
    title: String,
    colour: u32,
    answer_chunks: Vec<String>,
    thought_chunks: Vec<String>,
    question: String,
    sources: String,
}

impl AnswerPages {
    #[must_use]
    pub fn new(
        title: String,
        colour: u32,
        answer: &str,
        thought: &str,
        sources: &str,
        question: &str,
    ) -> Self {
        Self {
            title,
            colour,
            answer_chunks: split_chunks(answer, ANSWER_PAGE_CHARS),
            thought_chunks: split_chunks(thought, THOUGHT_PAGE_CHARS),
            question: truncate_chars(question, FIELD_CHARS),
            sources: truncate_chars(sources, FIELD_CHARS),
        }
    }
}

impl PageProvider for AnswerPages {
    fn get_page(&self, index: usize) -> (Page, usize) {
        let total_items = self.answer_chunks.len().max(self.thought_chunks.len());
        let total = page_count(total_items, 1);
        let offset = index.saturating_sub(1);

        let body = self.answer_chunks.get(offset).cloned().unwrap_or_default();
        let thought = self
            .thought_chunks
            .get(offset)
            .map(|text| ThoughtSection {
                heading: format!("Thought process{}", part_annotation(index, total)),
                text: text.clone(),
            });
        let footer = (total > 1).then(|| format!("Page {index} from {total}"));

        let page = Page {
            title: self.title.clone(),
            colour: self.colour,
            body,
            thought,
            question: self.question.clone(),
            sources: self.sources.clone(),
            footer,
        };
        (page, total)
    }
}

/// `" (Part i of n)"`, or nothing when everything fits on one page.
fn part_annotation(current: usize, total: usize) -> String {
    if total == 1 {
        return String::new();
    }
    format!(" (Part {current} of {total})")
}

#[cfg(test)]
mod tests {
    use super::super::nav::{NavAction, NavState};
    use super::*;

    const COLOUR: u32 = 0x00AE_EF;

    fn pages(answer: &str, thought: &str) -> AnswerPages {
        AnswerPages::new(
            "Answer".to_string(),
            COLOUR,
            answer,
            thought,
            "[doc](https://example.com)",
            "why?",
        )
    }

    #[test]
    fn single_page_has_no_footer_or_part_annotation() {
        let provider = pages("short answer", "short thought");
        let (page, total) = provider.get_page(1);
        assert_eq!(total, 1);
        assert_eq!(page.body, "short answer");
        assert!(page.footer.is_none());
        let thought = page.thought.expect("thought section");
        assert_eq!(thought.heading, "Thought process");
        assert_eq!(thought.text, "short thought");
    }

    #[test]
    fn long_answer_paginates_with_footer_and_annotation() {
        let answer = "a".repeat(10_000);
        let provider = pages(&answer, "one short thought");

        let (first, total) = provider.get_page(1);
        assert_eq!(total, 3);
        assert_eq!(first.body.chars().count(), 4096);
        assert_eq!(first.footer.as_deref(), Some("Page 1 from 3"));
        let thought = first.thought.expect("thought section on page 1");
        assert_eq!(thought.heading, "Thought process (Part 1 of 3)");

        let (last, _) = provider.get_page(3);
        assert_eq!(last.body.chars().count(), 1808);
        assert_eq!(last.footer.as_deref(), Some("Page 3 from 3"));
    }

    #[test]
    fn part_annotation_uses_page_index() {
        let answer = "a".repeat(ANSWER_PAGE_CHARS * 3);
        let thought = "b".repeat(THOUGHT_PAGE_CHARS * 3);
        let provider = pages(&answer, &thought);
        let (page, _) = provider.get_page(3);
        let section = page.thought.expect("thought section");
        assert_eq!(section.heading, "Thought process (Part 3 of 3)");
    }

    #[test]
    fn short_thought_sequence_contributes_nothing_past_its_length() {
        let answer = "a".repeat(ANSWER_PAGE_CHARS * 2);
        let provider = pages(&answer, "only one part");
        let (page, total) = provider.get_page(2);
        assert_eq!(total, 2);
        assert!(page.thought.is_none());
        assert!(!page.body.is_empty());
    }

    #[test]
    fn thought_sequence_can_outnumber_answer_pages() {
        let thought = "b".repeat(THOUGHT_PAGE_CHARS * 2);
        let provider = pages("short", &thought);
        let (page, total) = provider.get_page(2);
        assert_eq!(total, 2);
        assert!(page.body.is_empty());
        assert!(page.thought.is_some());
    }

    #[test]
    fn empty_content_still_renders_one_page() {
        let provider = pages("", "");
        let (page, total) = provider.get_page(1);
        assert_eq!(total, 1);
        assert!(page.body.is_empty());
        assert!(page.thought.is_none());
        assert_eq!(page.question, "why?");
    }

    #[test]
    fn get_page_is_idempotent() {
        let answer = "a".repeat(9000);
        let provider = pages(&answer, "thought");
        assert_eq!(provider.get_page(2), provider.get_page(2));
    }

    #[test]
    fn out_of_range_index_degrades_to_empty_page() {
        let provider = pages("short", "thought");
        let (page, total) = provider.get_page(7);
        assert_eq!(total, 1);
        assert!(page.body.is_empty());
        assert!(page.thought.is_none());
    }

    #[test]
    fn next_navigation_renders_the_following_page() {
        let answer = "a".repeat(ANSWER_PAGE_CHARS * 3);
        let provider = pages(&answer, "");
        let mut nav = NavState::new();

        let (_, total) = provider.get_page(nav.index);
        nav.record_total(total);
        nav.apply(NavAction::Next);
        assert_eq!(nav.index, 2);

        let (page, _) = provider.get_page(nav.index);
        assert_eq!(page.footer.as_deref(), Some("Page 2 from 3"));
    }

    #[test]
    fn oversized_auxiliary_fields_are_truncated() {
        let long = "q".repeat(3000);
        let provider = AnswerPages::new(
            "Answer".to_string(),
            COLOUR,
            "body",
            "",
            &long,
            &long,
        );
        let (page, _) = provider.get_page(1);
        assert_eq!(page.question.chars().count(), 1024);
        assert_eq!(page.sources.chars().count(), 1024);
    }
}
