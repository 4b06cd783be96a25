//! Tokio driver that enforces the single-in-flight lookup invariant.
//!
//! [`SearchSession`] pairs a [`SearchController`] with a [`CatalogLookup`]
//! client. Query changes are handled synchronously by the controller; when
//! it asks for remote augmentation, the session aborts whatever lookup
//! task is still running and spawns exactly one new one. Resolved batches
//! travel through a channel and are filtered by generation before the
//! caller ever sees them, so a response to a superseded query can never
//! overwrite newer state.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use gudang_search::CatalogItem;

use crate::config::SearchConfig;
use crate::controller::SearchController;
use crate::error::Result;
use crate::lookup::{CatalogLookup, LookupRequest};

struct RemoteBatch<T> {
    generation: u64,
    items: Vec<T>,
}

/// One search context: controller state plus at most one lookup task.
///
/// Construct one per search surface and drop it when the surface goes
/// away; dropping aborts any in-flight lookup.
pub struct SearchSession<T, C> {
    controller: SearchController<T>,
    client: C,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<RemoteBatch<T>>,
    rx: mpsc::UnboundedReceiver<RemoteBatch<T>>,
}

impl<T, C> SearchSession<T, C>
where
    T: CatalogItem + Clone + Send + 'static,
    C: CatalogLookup<Item = T> + Clone + 'static,
{
    /// Create a session with a validated configuration.
    pub fn new(config: SearchConfig, client: C) -> Result<Self> {
        config.validate()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            controller: SearchController::new(config),
            client,
            in_flight: None,
            tx,
            rx,
        })
    }

    /// Replace the backing item set (caller refresh or post-merge).
    pub fn set_items(&mut self, items: Vec<T>) {
        self.controller.set_items(items);
    }

    /// Update the query; recomputes synchronously and manages the lookup
    /// task. Must be called from the session's owning task.
    pub fn set_query(&mut self, query: &str) {
        if self.controller.query() == query {
            return;
        }
        let request = self.controller.set_query(query);
        // Cancel before reissue: the superseded task stops doing work
        // instead of racing the new one to the channel.
        self.abort_in_flight();
        if let Some(request) = request {
            self.spawn_lookup(request);
        }
    }

    /// Wait for the next remote batch that is still current.
    ///
    /// Stale batches (issued for a query that has since changed) are
    /// dropped silently. Returns the discovered items for the caller to
    /// merge — de-duplication by item identity is the caller's policy —
    /// and feed back through [`SearchSession::set_items`]. Only await this
    /// while a lookup may be outstanding; see [`SearchSession::try_remote`]
    /// for polling callers.
    pub async fn next_remote(&mut self) -> Option<Vec<T>> {
        while let Some(batch) = self.rx.recv().await {
            if self.controller.complete_lookup(batch.generation) {
                return Some(batch.items);
            }
            debug!(
                generation = batch.generation,
                "discarding stale remote lookup response"
            );
        }
        None
    }

    /// Drain any already-resolved remote batch without waiting.
    pub fn try_remote(&mut self) -> Option<Vec<T>> {
        while let Ok(batch) = self.rx.try_recv() {
            if self.controller.complete_lookup(batch.generation) {
                return Some(batch.items);
            }
            debug!(
                generation = batch.generation,
                "discarding stale remote lookup response"
            );
        }
        None
    }

    /// Whether a lookup task is currently outstanding.
    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The controller backing this session.
    #[must_use]
    pub fn controller(&self) -> &SearchController<T> {
        &self.controller
    }

    /// Ranked suggestions for the current query.
    #[must_use]
    pub fn suggestions(&self) -> &[T] {
        self.controller.suggestions()
    }

    /// Broader filtered listing for the current query.
    #[must_use]
    pub fn filtered(&self) -> &[T] {
        self.controller.filtered()
    }

    /// The backing item set.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.controller.items()
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            trace!("aborted superseded lookup task");
        }
    }

    fn spawn_lookup(&mut self, request: LookupRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let LookupRequest {
                query,
                limit,
                generation,
            } = request;
            match client.lookup(&query, limit).await {
                Ok(items) => {
                    debug!(
                        query = %query,
                        count = items.len(),
                        generation,
                        "remote lookup resolved"
                    );
                    let _ = tx.send(RemoteBatch { generation, items });
                }
                Err(e) if e.is_cancelled() => {
                    trace!(query = %query, "remote lookup cancelled");
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "remote lookup failed");
                }
            }
        }));
    }
}

impl<T, C> Drop for SearchSession<T, C> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;
    use tokio::time::{timeout, Duration};

    use super::*;
    use crate::lookup::{LookupError, LookupResult};

    #[derive(Debug, Clone, PartialEq)]
    struct TestItem {
        name: String,
    }

    impl CatalogItem for TestItem {
        fn name(&self) -> Option<&str> {
            Some(&self.name)
        }

        fn specification(&self) -> Option<&str> {
            None
        }

        fn category(&self) -> Option<&str> {
            None
        }
    }

    fn item(name: &str) -> TestItem {
        TestItem {
            name: name.to_string(),
        }
    }

    /// Flags a lookup future that was dropped before it completed.
    struct CancelGuard {
        cancelled: Arc<AtomicUsize>,
        armed: bool,
    }

    impl CancelGuard {
        fn disarm(mut self) {
            self.armed = false;
        }
    }

    impl Drop for CancelGuard {
        fn drop(&mut self) {
            if self.armed {
                self.cancelled.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[derive(Clone, Default)]
    struct MockClient {
        started: Arc<AtomicUsize>,
        cancelled: Arc<AtomicUsize>,
        queries: Arc<Mutex<Vec<String>>>,
        release: Arc<Notify>,
        gated: bool,
        fail: bool,
        items: Vec<TestItem>,
    }

    impl MockClient {
        fn returning(items: Vec<TestItem>) -> Self {
            Self {
                items,
                ..Self::default()
            }
        }

        fn gated(items: Vec<TestItem>) -> Self {
            Self {
                gated: true,
                ..Self::returning(items)
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    impl CatalogLookup for MockClient {
        type Item = TestItem;

        fn lookup(
            &self,
            query: &str,
            _limit: usize,
        ) -> impl Future<Output = LookupResult<TestItem>> + Send {
            let this = self.clone();
            let query = query.to_string();
            async move {
                this.started.fetch_add(1, Ordering::SeqCst);
                this.queries.lock().unwrap().push(query);
                let guard = CancelGuard {
                    cancelled: this.cancelled.clone(),
                    armed: true,
                };
                if this.gated {
                    this.release.notified().await;
                }
                guard.disarm();
                if this.fail {
                    return Err(LookupError::Failed("backend unavailable".to_string()));
                }
                Ok(this.items.clone())
            }
        }
    }

    /// Let spawned lookup tasks run up to their next await point.
    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    fn session(client: MockClient) -> SearchSession<TestItem, MockClient> {
        let mut session =
            SearchSession::new(SearchConfig::default(), client).expect("valid config");
        session.set_items(vec![item("Kompor Gas")]);
        session
    }

    #[tokio::test]
    async fn test_sparse_query_issues_single_lookup() {
        let client = MockClient::returning(vec![item("Oven Tanam")]);
        let mut session = session(client.clone());

        // "zz" matches nothing locally (too short for the fuzzy tier)
        session.set_query("zz");
        settle().await;

        assert_eq!(client.started.load(Ordering::SeqCst), 1);
        assert_eq!(client.queries(), vec!["zz"]);
    }

    #[tokio::test]
    async fn test_plentiful_local_results_skip_remote() {
        let client = MockClient::returning(vec![]);
        let mut session =
            SearchSession::new(SearchConfig::default(), client.clone()).expect("valid config");
        session.set_items((0..5).map(|i| item(&format!("Kompor {i}"))).collect());

        session.set_query("kompor");
        settle().await;

        assert_eq!(client.started.load(Ordering::SeqCst), 0);
        assert!(!session.has_in_flight());
    }

    #[tokio::test]
    async fn test_new_query_aborts_in_flight_lookup() {
        let client = MockClient::gated(vec![item("Oven Tanam")]);
        let mut session = session(client.clone());

        session.set_query("zz");
        settle().await;
        assert_eq!(client.started.load(Ordering::SeqCst), 1);

        // Second keystroke before the first lookup resolves: the first
        // task must be cancelled, not merely ignored
        session.set_query("zzz");
        settle().await;

        assert_eq!(client.cancelled.load(Ordering::SeqCst), 1);
        assert_eq!(client.started.load(Ordering::SeqCst), 2);
        assert_eq!(client.queries(), vec!["zz", "zzz"]);

        // Release the surviving task; its batch is for the current query
        client.release.notify_one();
        let merged = timeout(Duration::from_secs(1), session.next_remote())
            .await
            .expect("lookup should resolve");
        assert_eq!(merged, Some(vec![item("Oven Tanam")]));
        assert_eq!(client.started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_response_never_applied() {
        let client = MockClient::returning(vec![item("Oven Tanam")]);
        let mut session = session(client.clone());

        // First lookup resolves fully before the query moves on; its
        // batch sits unread in the channel
        session.set_query("zz");
        settle().await;
        session.set_query("zzz");
        settle().await;

        // The first batch is stale by generation and must be skipped
        let merged = timeout(Duration::from_secs(1), session.next_remote())
            .await
            .expect("current lookup should resolve");
        assert_eq!(merged, Some(vec![item("Oven Tanam")]));
        assert_eq!(client.started.load(Ordering::SeqCst), 2);
        // Nothing else pending: both batches are consumed or discarded
        assert!(session.try_remote().is_none());
    }

    #[tokio::test]
    async fn test_short_query_abandons_lookup() {
        let client = MockClient::gated(vec![item("Oven Tanam")]);
        let mut session = session(client.clone());

        session.set_query("zz");
        settle().await;
        assert!(session.has_in_flight());

        session.set_query("z");
        settle().await;

        assert_eq!(client.cancelled.load(Ordering::SeqCst), 1);
        assert!(!session.has_in_flight());
        assert!(session.try_remote().is_none());
        // Below the length threshold the filtered list is the full set
        assert!(session.suggestions().is_empty());
        assert_eq!(session.filtered(), session.items());
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_state_untouched() {
        let client = MockClient::failing();
        let mut session = session(client.clone());

        session.set_query("zz");
        settle().await;

        assert_eq!(client.started.load(Ordering::SeqCst), 1);
        assert!(session.try_remote().is_none());
        assert!(session.suggestions().is_empty());
        assert_eq!(session.controller().pending_lookup(), Some(1));
    }

    #[tokio::test]
    async fn test_merge_flow_updates_suggestions() {
        let client = MockClient::returning(vec![item("Oven Tanam"), item("Kompor Gas")]);
        let mut session = session(client.clone());

        session.set_query("oven tanam");
        let merged = timeout(Duration::from_secs(1), session.next_remote())
            .await
            .expect("lookup should resolve")
            .expect("batch should be current");

        // Caller-side merge: de-duplicate by name, then feed back
        let mut items = session.items().to_vec();
        for discovered in merged {
            if !items.iter().any(|i| i.name == discovered.name) {
                items.push(discovered);
            }
        }
        session.set_items(items);

        assert_eq!(session.items().len(), 2);
        assert_eq!(
            session
                .suggestions()
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Oven Tanam"]
        );
    }
}
