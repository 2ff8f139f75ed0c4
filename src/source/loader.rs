use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::debug;

use super::ExportSource;
use crate::error::Result;
use crate::models::{DateIndex, ExportMeta, Page};

/// Number of pages kept in memory
pub const DEFAULT_CACHE_PAGES: usize = 8;

/// Page loader with a small least-recently-used cache
///
/// The export is immutable, so a cached page is never stale. Failures are not
/// cached: a later request reads the file again.
pub struct PageLoader {
    source: Box<dyn ExportSource>,
    cache: HashMap<usize, Arc<Page>>,
    access_queue: VecDeque<usize>,
    capacity: usize,
}

impl PageLoader {
    pub fn new(source: Box<dyn ExportSource>) -> Self {
        Self::with_capacity(source, DEFAULT_CACHE_PAGES)
    }

    pub fn with_capacity(source: Box<dyn ExportSource>, capacity: usize) -> Self {
        Self { source, cache: HashMap::new(), access_queue: VecDeque::new(), capacity: capacity.max(1) }
    }

    pub fn meta(&self) -> &ExportMeta {
        self.source.meta()
    }

    /// Load internal page `index`, serving repeated requests from the cache
    pub fn load(&mut self, index: usize) -> Result<Arc<Page>> {
        if let Some(page) = self.cache.get(&index).cloned() {
            debug!(page = index, "page cache hit");
            self.touch(index);
            return Ok(page);
        }

        let page = Arc::new(self.source.load_page(index)?);
        debug!(page = index, messages = page.len(), "page loaded");
        self.cache.insert(index, Arc::clone(&page));
        self.touch(index);
        self.prune();
        Ok(page)
    }

    pub fn load_date_index(&self) -> Result<DateIndex> {
        self.source.load_date_index()
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    fn touch(&mut self, index: usize) {
        self.access_queue.retain(|&i| i != index);
        self.access_queue.push_back(index);
    }

    fn prune(&mut self) {
        while self.cache.len() > self.capacity {
            match self.access_queue.pop_front() {
                Some(oldest) => {
                    self.cache.remove(&oldest);
                }
                None => break,
            }
        }
    }
}
