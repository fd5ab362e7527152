//! Fixed-size pages over a materialized result list

use crate::error::{Error, Result};
use std::num::NonZeroUsize;
use std::slice::Chunks;

/// Splits a slice into pages of `page_size` items; the last page may be short.
///
/// Iteration borrows the slice, so a paginator can be walked any number of times.
///
/// # Examples
/// ```
/// use docsearch::paginator::paginate;
///
/// let items = [1, 2, 3, 4, 5];
/// let pages = paginate(&items, 2).unwrap();
/// assert_eq!(pages.len(), 3);
/// assert_eq!(pages.pages().last().unwrap(), &[5]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: NonZeroUsize,
}

impl<'a, T> Paginator<'a, T> {
    /// Create a paginator; a zero page size is rejected
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        let page_size = NonZeroUsize::new(page_size).ok_or(Error::InvalidPageSize)?;
        Ok(Paginator { items, page_size })
    }

    /// Fresh iterator over the pages
    pub fn pages(&self) -> Chunks<'a, T> {
        self.items.chunks(self.page_size.get())
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.items.len().div_ceil(self.page_size.get())
    }

    /// True when there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items per full page
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = Chunks<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}

/// Paginate a slice
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}
