//! Page windows over a collection.
//!
//! A [`Page`] is a small copyable value. Navigation returns a new page and
//! never leaves the valid range: `index < max(total, 1)` always holds.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    index: usize,
    size: usize,
    total: usize,
}

impl Page {
    pub fn new(size: usize) -> Self {
        Self {
            index: 0,
            size: size.max(1),
            total: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Update the number of pages, pulling the index back into range
    pub fn with_total(self, total: usize) -> Self {
        Self { total, ..self }.clamp()
    }

    pub fn first(self) -> Self {
        Self { index: 0, ..self }
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.total
    }

    pub fn has_next(&self) -> bool {
        !self.is_last()
    }

    pub fn has_previous(&self) -> bool {
        !self.is_first()
    }

    /// The following page, or `self` on the last page
    pub fn next(self) -> Self {
        if self.has_next() {
            Self {
                index: self.index + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// The preceding page, or `self` on the first page
    pub fn previous(self) -> Self {
        if self.has_previous() {
            Self {
                index: self.index - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Only worth rendering a paginator for more than one page
    pub fn needs_paginator(&self) -> bool {
        self.total > 1
    }

    /// One based label, e.g. `2 / 5`
    pub fn label(&self) -> String {
        format!("{} / {}", self.index + 1, self.total.max(1))
    }

    /// Pull the index back into `0..max(total, 1)`
    pub fn clamp(self) -> Self {
        let max_index = self.total.max(1) - 1;
        Self {
            index: self.index.min(max_index),
            ..self
        }
    }
}

/// `ceil(count / size)`, `0` for an empty collection
pub fn total_pages(count: usize, size: usize) -> usize {
    let size = size.max(1);
    (count + size - 1) / size
}

/// The items of `page`, empty if the page lies beyond the collection
pub fn paginate<T>(items: &[T], page: Page) -> &[T] {
    let start = page.index() * page.size();
    if start >= items.len() {
        return &[];
    }
    let end = (start + page.size()).min(items.len());
    &items[start..end]
}
