//! Paginated embed widget for browsing long, multi-part answers.

mod chunk;
mod nav;
mod page;
mod view;

pub use chunk::{page_count, split_chunks, truncate_chars};
pub use nav::{Controls, NavAction, NavState};
pub use page::{
    ANSWER_PAGE_CHARS, AnswerPages, Page, PageProvider, THOUGHT_PAGE_CHARS, ThoughtSection,
};
pub use view::{INACTIVITY_TIMEOUT, Paginator, ResponseSource};
