//! Traversal of paginated named listings.

use crate::error::Result;
use crate::retry::RetryPolicy;
use futures::future::BoxFuture;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;

/// One entry of a named listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntry {
    pub name: String,
    pub id: u32,
}

/// One batch of a paginated listing.
#[derive(Debug, Clone)]
pub struct Page {
    pub entries: Vec<NamedEntry>,
    pub has_more: bool,
}

/// Raw batch-listing function `(offset, limit) -> Page` supplied by the
/// environment.
pub type PageFn = Arc<dyn Fn(u32, u32) -> BoxFuture<'static, Result<Page>> + Send + Sync>;

/// Walks a batched listing endpoint from offset 0 to completion.
///
/// A walker is a one-shot traversal: it buffers the current batch and
/// requests the next one on demand. It never caches across traversals; a
/// fresh walker re-issues network requests from offset 0. Keeping the
/// results around is [`crate::names::NameIndex`]'s job.
pub struct PageWalker {
    batch: PageFn,
    retry: RetryPolicy,
    page_size: u32,
    offset: u32,
    buffer: VecDeque<NamedEntry>,
    exhausted: bool,
}

impl PageWalker {
    pub fn new(batch: PageFn, retry: RetryPolicy, page_size: u32) -> Self {
        Self {
            batch,
            retry,
            page_size,
            offset: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Yield the next listing entry, requesting a new batch when the
    /// buffered one drains.
    ///
    /// Batch requests run under the walker's retry policy. Once a batch
    /// reports no further page the walker is terminal: every later call
    /// returns `Ok(None)` without touching the network.
    pub async fn next_entry(&mut self) -> Result<Option<NamedEntry>> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Ok(Some(entry));
            }
            if self.exhausted {
                return Ok(None);
            }

            let batch = &self.batch;
            let offset = self.offset;
            let limit = self.page_size;
            let page = self.retry.run(|| batch(offset, limit)).await?;

            self.offset += self.page_size;
            self.exhausted = !page.has_more;
            self.buffer = page.entries.into();
        }
    }

    /// The remaining entries as a lazy stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<NamedEntry>> {
        stream::unfold(self, |mut walker| async move {
            match walker.next_entry().await {
                Ok(Some(entry)) => Some((Ok(entry), walker)),
                Ok(None) => None,
                Err(err) => Some((Err(err), walker)),
            }
        })
    }
}
