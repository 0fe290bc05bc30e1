//! Incremental pagination over the current filtered view.
//!
//! The controller holds no UI references. Every mutation returns a
//! [`RenderInstruction`] describing what the presentation layer must draw.

use crate::model::Record;
use crate::state::query::FilteredView;
use std::num::NonZeroUsize;
use std::ops::Range;

/// What the grid must do after a pagination change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Discard every rendered card and draw these from scratch.
    Replace(Vec<Record>),
    /// Keep the rendered cards and append only these.
    Append(Vec<Record>),
}

impl RenderInstruction {
    /// Records carried by either variant.
    pub fn records(&self) -> &[Record] {
        match self {
            RenderInstruction::Replace(records) | RenderInstruction::Append(records) => records,
        }
    }
}

/// Pagination state over a [`FilteredView`].
///
/// Invariant: `page_index <= last_page()`, and `page_index` is 0 right
/// after [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct ViewController {
    view: FilteredView,
    page_index: usize,
    page_size: NonZeroUsize,
}

impl ViewController {
    /// Controller over an empty view.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            view: FilteredView::default(),
            page_index: 0,
            page_size,
        }
    }

    /// Swap in a freshly computed view and go back to the first page.
    pub fn reset(&mut self, view: FilteredView) -> RenderInstruction {
        self.view = view;
        self.page_index = 0;
        RenderInstruction::Replace(self.view.as_slice()[self.page_range(0)].to_vec())
    }

    /// Expose the next page.
    ///
    /// Returns `None` and changes nothing when no further page exists.
    pub fn advance(&mut self) -> Option<RenderInstruction> {
        if !self.has_more() {
            return None;
        }
        self.page_index += 1;
        let range = self.page_range(self.page_index);
        Some(RenderInstruction::Append(self.view.as_slice()[range].to_vec()))
    }

    /// Number of cards currently shown (for the "N of M" readout).
    pub fn visible_count(&self) -> usize {
        self.page_end(self.page_index)
    }

    /// Whether [`advance`](Self::advance) would expose anything.
    pub fn has_more(&self) -> bool {
        self.unclamped_end(self.page_index) < self.view.len()
    }

    /// Every card exposed so far, from the first page to the current one.
    pub fn visible(&self) -> &[Record] {
        &self.view.as_slice()[..self.visible_count()]
    }

    /// The most recently exposed page.
    pub fn current_page(&self) -> &[Record] {
        &self.view.as_slice()[self.page_range(self.page_index)]
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Records per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Length of the whole view.
    pub fn total(&self) -> usize {
        self.view.len()
    }

    /// The view being paged.
    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Index of the last page that can ever be reached (0 for an empty view).
    pub fn last_page(&self) -> usize {
        self.view.len().div_ceil(self.page_size.get()).saturating_sub(1)
    }

    fn unclamped_end(&self, page: usize) -> usize {
        (page + 1).saturating_mul(self.page_size.get())
    }

    fn page_end(&self, page: usize) -> usize {
        self.unclamped_end(page).min(self.view.len())
    }

    fn page_range(&self, page: usize) -> Range<usize> {
        let start = page.saturating_mul(self.page_size.get()).min(self.view.len());
        start..self.page_end(page)
    }
}
