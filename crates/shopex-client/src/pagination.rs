//! Cursor-based pagination over GraphQL connections.
//!
//! Every connection reports `pageInfo { hasNextPage endCursor }`; the next
//! page is requested by passing `endCursor` as `after:`. A connection is
//! exhausted when `hasNextPage` is `false`.
//!
//! [`CursorTracker`] guards the walk: it caps the number of pages and rejects
//! a cursor that was already followed, so a misbehaving endpoint cannot keep
//! the loop alive or hand back the same records twice.

use std::collections::HashSet;

use crate::error::ClientError;
use crate::types::PageInfo;

/// Maximum number of pages walked for any single connection.
pub const MAX_PAGES: usize = 10_000;

/// Returns the cursor for the next page, or `None` once the connection is
/// exhausted.
///
/// A page that claims `hasNextPage` without an `endCursor` (or with an empty
/// one) is treated as the last page.
#[must_use]
pub fn next_cursor(page_info: &PageInfo) -> Option<&str> {
    if !page_info.has_next_page {
        return None;
    }
    page_info.end_cursor.as_deref().filter(|c| !c.is_empty())
}

/// Tracks page count and followed cursors for one pagination walk.
#[derive(Debug)]
pub struct CursorTracker {
    operation: String,
    max_pages: usize,
    pages: usize,
    seen: HashSet<String>,
}

impl CursorTracker {
    #[must_use]
    pub fn new(operation: &str, max_pages: usize) -> Self {
        Self {
            operation: operation.to_owned(),
            max_pages,
            pages: 0,
            seen: HashSet::new(),
        }
    }

    /// Pages started so far.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Records the start of a page request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::PaginationLimit`] once more than `max_pages`
    /// pages have been requested.
    pub fn begin_page(&mut self) -> Result<usize, ClientError> {
        self.pages += 1;
        if self.pages > self.max_pages {
            return Err(ClientError::PaginationLimit {
                operation: self.operation.clone(),
                max_pages: self.max_pages,
            });
        }
        Ok(self.pages)
    }

    /// Computes the cursor to follow after a page, or `None` when done.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RepeatedCursor`] if the page hands back a
    /// cursor that was already followed.
    pub fn advance(&mut self, page_info: &PageInfo) -> Result<Option<String>, ClientError> {
        let Some(cursor) = next_cursor(page_info) else {
            return Ok(None);
        };
        if !self.seen.insert(cursor.to_owned()) {
            return Err(ClientError::RepeatedCursor {
                operation: self.operation.clone(),
                cursor: cursor.to_owned(),
            });
        }
        Ok(Some(cursor.to_owned()))
    }
}
