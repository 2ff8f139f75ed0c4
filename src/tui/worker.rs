//! Background page loading for the terminal viewer
//!
//! The worker thread owns the [`PageLoader`]. Requests that pile up while a
//! page is being read are collapsed to the most recent one before the next
//! read starts; anything that still completes out of date is discarded by the
//! controller's generation check.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::models::Page;
use crate::source::PageLoader;
use crate::view::LoadTicket;

pub type LoadResult = (LoadTicket, Result<Arc<Page>>);

pub struct PageWorker {
    requests: Option<Sender<LoadTicket>>,
    results: Receiver<LoadResult>,
    handle: Option<JoinHandle<()>>,
}

impl PageWorker {
    pub fn spawn(mut loader: PageLoader) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<LoadTicket>();
        let (result_tx, result_rx) = mpsc::channel::<LoadResult>();

        let handle = thread::spawn(move || {
            while let Ok(mut ticket) = request_rx.recv() {
                while let Ok(next) = request_rx.try_recv() {
                    debug!(skipped = ticket.index, index = next.index, "collapsing queued page request");
                    ticket = next;
                }
                let result = loader.load(ticket.index);
                if result_tx.send((ticket, result)).is_err() {
                    return;
                }
            }
        });

        Self { requests: Some(request_tx), results: result_rx, handle: Some(handle) }
    }

    pub fn submit(&self, ticket: LoadTicket) {
        if let Some(tx) = &self.requests
            && tx.send(ticket).is_err()
        {
            debug!(index = ticket.index, "page worker has stopped, request dropped");
        }
    }

    /// Next finished load, if any, without blocking
    pub fn try_next(&self) -> Option<LoadResult> {
        match self.results.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next finished load
    pub fn next_timeout(&self, timeout: Duration) -> Option<LoadResult> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for PageWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::models::{Author, Message, Role};
    use crate::source::SingleFileExport;
    use crate::view::ScrollTarget;

    fn loader(count: usize) -> PageLoader {
        let messages = (0..count)
            .map(|i| Message {
                id: Some(i as u64),
                datetime: NaiveDateTime::parse_from_str("2021-01-01T10:00:00", "%Y-%m-%dT%H:%M:%S")
                    .unwrap(),
                author: Author { name: "A".to_string(), role: Role::Other, vk_id: None },
                text: Some(format!("m{}", i)),
                attachments: vec![],
                edited: false,
            })
            .collect();
        PageLoader::new(Box::new(SingleFileExport::from_messages(Path::new("/x/export"), messages, 2)))
    }

    fn ticket(generation: u64, index: usize) -> LoadTicket {
        LoadTicket { generation, index, scroll: ScrollTarget::Top }
    }

    #[test]
    fn test_worker_loads_requested_page() {
        let worker = PageWorker::spawn(loader(5));
        worker.submit(ticket(1, 1));

        let (done, result) = worker.next_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(done, ticket(1, 1));
        let page = result.unwrap();
        assert_eq!(page.index, 1);
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_worker_reports_errors() {
        let worker = PageWorker::spawn(loader(2));
        worker.submit(ticket(1, 9));

        let (_, result) = worker.next_timeout(Duration::from_secs(5)).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_latest_request_is_always_answered() {
        let worker = PageWorker::spawn(loader(10));
        for generation in 1..=4 {
            worker.submit(ticket(generation, generation as usize));
        }

        let mut last = None;
        while let Some((done, _)) = worker.next_timeout(Duration::from_millis(500)) {
            last = Some(done);
        }
        assert_eq!(last, Some(ticket(4, 4)));
    }
}
