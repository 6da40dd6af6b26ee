// src/api/pagination.rs
//! Lazy offset/limit pagination over a caller-supplied page fetch.
//!
//! Turns a remote collection exposed through offset/limit pages into a
//! single forward-only sequence of items, fetching pages on demand and
//! never holding more than the current page in memory. The fetch
//! function is expected to arrive already wrapped with retry and error
//! normalization; this module only drives offsets and termination.
//!
//! Exhaustion is inferred structurally, never from a server-reported
//! total: an empty page ends the sequence, and a short page (fewer than
//! `page_size` items) is taken to be the last page. The short-page rule
//! assumes the remote side never serves a short page mid-collection;
//! if it ever does (e.g. concurrent deletions on the server), iteration
//! ends early and silently. This is a documented limitation of the
//! offset/limit contract, inherited by every consumer of this module.

use futures::Stream;
use std::future::Future;

/// Pull-based cursor over a paginated remote collection.
///
/// Owns the traversal state: the next offset, the buffered remainder of
/// the current page, and the exhaustion flag. One value of this type is
/// one traversal; re-traversal means constructing a new pager, which
/// restarts at offset 0.
pub struct OffsetPager<T, F> {
    fetch: F,
    page_size: usize,
    offset: usize,
    buffer: std::vec::IntoIter<T>,
    exhausted: bool,
}

impl<T, F> OffsetPager<T, F> {
    /// Creates a pager over `fetch` with a fixed page size.
    ///
    /// `page_size` must be positive; it stays fixed for the lifetime of
    /// the traversal.
    pub fn new(fetch: F, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            fetch,
            page_size,
            offset: 0,
            buffer: Vec::new().into_iter(),
            exhausted: false,
        }
    }

    /// Offset the next fetch would use: the count of items returned by
    /// all previous fetches.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the collection boundary has been observed. Once true, no
    /// further fetches are issued and draining the buffer is all that
    /// remains.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Pulls the next item, fetching the next page when the buffer runs
    /// dry. Returns `Ok(None)` once the collection is exhausted, and
    /// keeps returning it on every subsequent pull.
    ///
    /// On a fetch error the pager marks itself exhausted before
    /// propagating, so a caller that keeps pulling after an error gets
    /// `Ok(None)` instead of fetches issued from an inconsistent cursor.
    pub async fn try_next<E, Fut>(&mut self) -> Result<Option<T>, E>
    where
        F: FnMut(usize, usize) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(item) = self.buffer.next() {
            return Ok(Some(item));
        }

        if self.exhausted {
            return Ok(None);
        }

        let page = match (self.fetch)(self.offset, self.page_size).await {
            Ok(page) => page,
            Err(error) => {
                self.exhausted = true;
                return Err(error);
            }
        };

        let fetched = page.len();
        if fetched == 0 {
            // Covers both the empty collection and a collection whose
            // size is an exact multiple of the page size: the one extra
            // zero-item fetch is expected, not an error.
            self.exhausted = true;
            return Ok(None);
        }

        self.offset += fetched;
        if fetched < self.page_size {
            // Short page: necessarily the last one.
            self.exhausted = true;
        }

        log::debug!(
            "fetched page of {} items, next offset {}, exhausted: {}",
            fetched,
            self.offset,
            self.exhausted
        );

        self.buffer = page.into_iter();
        Ok(self.buffer.next())
    }
}

/// The lazy sequence surface: adapts an [`OffsetPager`] into a finite,
/// single-pass `Stream` of items.
///
/// `fetch(offset, limit)` is pulled one page at a time; at most one
/// fetch is outstanding per stream instance, and no fetch is issued
/// speculatively. The stream terminates at the first error and yields
/// nothing afterwards; items yielded before the error remain valid.
/// Dropping the stream mid-traversal needs no cleanup, there is no
/// server-side cursor to release.
pub fn paginate<T, E, F, Fut>(fetch: F, page_size: usize) -> impl Stream<Item = Result<T, E>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    futures::stream::try_unfold(OffsetPager::new(fetch, page_size), |mut pager| async move {
        let item = pager.try_next().await?;
        Ok(item.map(|item| (item, pager)))
    })
}
