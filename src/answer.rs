//! Parsing of Open WebUI chat completions into displayable answers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BotError, Result};
use crate::openwebui::ChatCompletion;
use crate::pager::truncate_chars;

/// Discord embed title limit.
pub const MAX_TITLE_CHARS: usize = 256;

pub const ANSWER_COLOUR: u32 = 0x0000_AEEF;
pub const ERROR_COLOUR: u32 = 0x00FF_0000;

const DEFAULT_TITLE: &str = "Answer";

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("think pattern is valid"));

/// An answer ready for display: the model output split into its visible text
/// and thinking trace, plus the title and sources derived from the
/// completion's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAnswer {
    pub title: String,
    pub colour: u32,
    pub answer: String,
    pub thought: String,
    /// Markdown `[title](source)` lines, one per complete metadata entry.
    pub sources: String,
}

impl GeneratedAnswer {
    /// Build a displayable answer from a raw completion.
    ///
    /// Fails only when the completion carries no choices at all; missing
    /// titles, sources, or thinking traces degrade to defaults.
    pub fn from_completion(completion: &ChatCompletion) -> Result<Self> {
        let content = &completion
            .choices
            .first()
            .ok_or_else(|| BotError::OpenWebUiResponse("no choices in response".to_string()))?
            .message
            .content;

        let (answer, thought) = extract_thought_and_answer(content);
        let (title, colour) = derive_title(completion);
        let sources = format_sources(completion);

        Ok(Self {
            title,
            colour,
            answer,
            thought,
            sources,
        })
    }
}

/// Split the content into the visible answer and the thinking trace.
///
/// The first `<think>` block becomes the thought; every block is removed
/// from the answer, which is then trimmed. Content without tags yields an
/// empty thought.
fn extract_thought_and_answer(content: &str) -> (String, String) {
    let thought = THINK_BLOCK
        .captures(content)
        .map(|captures| captures[1].to_string())
        .unwrap_or_default();
    let answer = THINK_BLOCK.replace_all(content, "").trim().to_string();
    (answer, thought)
}

/// Embed title from the first source's name, or the default when absent.
/// The colour marks whether a sourced title was found.
fn derive_title(completion: &ChatCompletion) -> (String, u32) {
    let name = completion
        .sources
        .first()
        .and_then(|source| source.source.as_ref())
        .and_then(|origin| origin.name.as_deref());
    match name {
        Some(name) if !name.is_empty() => (truncate_chars(name, MAX_TITLE_CHARS), ANSWER_COLOUR),
        _ => (DEFAULT_TITLE.to_string(), ERROR_COLOUR),
    }
}

/// Markdown listing of the first source's metadata entries, skipping any
/// entry missing a title or a link.
fn format_sources(completion: &ChatCompletion) -> String {
    let Some(first) = completion.sources.first() else {
        return String::new();
    };
    first
        .metadata
        .iter()
        .filter_map(|link| match (&link.title, &link.source) {
            (Some(title), Some(source)) => Some(format!("[{title}]({source})")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(value: serde_json::Value) -> ChatCompletion {
        serde_json::from_value(value).expect("valid completion")
    }

    #[test]
    fn splits_thought_from_answer() {
        let (answer, thought) =
            extract_thought_and_answer("<think>pondering</think>\n\nThe answer.");
        assert_eq!(answer, "The answer.");
        assert_eq!(thought, "pondering");
    }

    #[test]
    fn untagged_content_yields_empty_thought() {
        let (answer, thought) = extract_thought_and_answer("Just an answer.");
        assert_eq!(answer, "Just an answer.");
        assert_eq!(thought, "");
    }

    #[test]
    fn keeps_first_thought_but_removes_every_block() {
        let (answer, thought) =
            extract_thought_and_answer("<think>first</think>a<think>second</think>b");
        assert_eq!(answer, "ab");
        assert_eq!(thought, "first");
    }

    #[test]
    fn thought_spans_newlines() {
        let (answer, thought) = extract_thought_and_answer("<think>line one\nline two</think>ok");
        assert_eq!(answer, "ok");
        assert_eq!(thought, "line one\nline two");
    }

    #[test]
    fn missing_choices_is_an_error() {
        let completion = completion(serde_json::json!({}));
        assert!(GeneratedAnswer::from_completion(&completion).is_err());
    }

    #[test]
    fn title_defaults_without_sources() {
        let completion = completion(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}]
        }));
        let answer = GeneratedAnswer::from_completion(&completion).expect("answer");
        assert_eq!(answer.title, "Answer");
        assert_eq!(answer.colour, ERROR_COLOUR);
        assert_eq!(answer.sources, "");
    }

    #[test]
    fn title_comes_from_first_source_and_is_truncated() {
        let long_name = "n".repeat(300);
        let completion = completion(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}],
            "sources": [{"source": {"name": long_name}}]
        }));
        let answer = GeneratedAnswer::from_completion(&completion).expect("answer");
        assert_eq!(answer.title.chars().count(), 256);
        assert_eq!(answer.colour, ANSWER_COLOUR);
    }

    #[test]
    fn sources_listing_skips_incomplete_entries() {
        let completion = completion(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}],
            "sources": [{
                "source": {"name": "Docs"},
                "metadata": [
                    {"title": "First", "source": "https://example.com/1"},
                    {"title": "No link"},
                    {"source": "https://example.com/untitled"},
                    {"title": "Second", "source": "https://example.com/2"}
                ]
            }]
        }));
        let answer = GeneratedAnswer::from_completion(&completion).expect("answer");
        assert_eq!(
            answer.sources,
            "[First](https://example.com/1)\n[Second](https://example.com/2)"
        );
    }

    #[test]
    fn missing_nested_source_fields_keep_defaults() {
        let completion = completion(serde_json::json!({
            "choices": [{"message": {"content": "hi"}}],
            "sources": [{"metadata": []}]
        }));
        let answer = GeneratedAnswer::from_completion(&completion).expect("answer");
        assert_eq!(answer.title, "Answer");
        assert_eq!(answer.sources, "");
    }
}
