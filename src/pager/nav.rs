//! Pure navigation state for the pager: current index, total pages, and the
//! enablement of the interactive controls derived from them.

/// A navigation command issued by a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    /// Toggle to the far end: the last page from the first half, the first
    /// page from the second half.
    JumpEnd,
}

/// Enablement of the pager's interactive controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub jump_disabled: bool,
    /// Whether the jump control currently points at the last page (true while
    /// the index is in the first half) or back at the first page.
    pub jump_to_end: bool,
    pub retry_disabled: bool,
}

/// Navigation state owned by one pager session.
///
/// The index is 1-based. `total_pages` is unset until the first render
/// reports it, and may change between renders when the underlying content
/// regenerates.
#[derive(Debug, Clone, Copy)]
pub struct NavState {
    pub index: usize,
    pub total_pages: Option<usize>,
}

impl NavState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: 1,
            total_pages: None,
        }
    }

    /// Total pages as last reported, defaulting to 1 before the first render.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total_pages.unwrap_or(1)
    }

    /// Record the page count reported by the latest render, clamping the
    /// index if the content shrank underneath us.
    pub fn record_total(&mut self, total: usize) {
        let total = total.max(1);
        self.total_pages = Some(total);
        if self.index > total {
            self.index = total;
        }
    }

    /// Apply a navigation command, clamping at the boundaries.
    pub fn apply(&mut self, action: NavAction) {
        let total = self.total();
        match action {
            NavAction::Previous => {
                if self.index > 1 {
                    self.index -= 1;
                }
            }
            NavAction::Next => {
                if self.index < total {
                    self.index += 1;
                }
            }
            NavAction::JumpEnd => {
                if self.index <= total / 2 {
                    self.index = total;
                } else {
                    self.index = 1;
                }
            }
        }
    }

    /// Control enablement for the current position.
    ///
    /// A single page disables every navigation control and leaves only retry
    /// active. Otherwise previous/next are disabled at their respective ends
    /// and jump is always available.
    #[must_use]
    pub fn controls(&self) -> Controls {
        let total = self.total();
        if total == 1 {
            return Controls {
                previous_disabled: true,
                next_disabled: true,
                jump_disabled: true,
                jump_to_end: true,
                retry_disabled: false,
            };
        }
        Controls {
            previous_disabled: self.index == 1,
            next_disabled: self.index == total,
            jump_disabled: false,
            jump_to_end: self.index <= total / 2,
            retry_disabled: false,
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}
