use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

use crate::domain::ordering::{PayloadError, ReorderPayload};

use super::list::OrderedList;
use super::submit::{PayloadSubmitter, SubmitError};

/// Which list a synchronizer watches, where it persists, and whether the list
/// shows ordinal labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderBinding {
    pub container_id: String,
    pub endpoint: String,
    pub update_labels: bool,
}

pub fn configure_reorder(
    container_id: impl Into<String>,
    endpoint: impl Into<String>,
    update_labels: bool,
) -> ReorderBinding {
    ReorderBinding {
        container_id: container_id.into(),
        endpoint: endpoint.into(),
        update_labels,
    }
}

#[derive(Debug, Error)]
pub enum ReorderError {
    #[error("list `{actual}` is not bound to this synchronizer (expected `{expected}`)")]
    UnboundContainer { expected: String, actual: String },
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("no tokio runtime is available to send the order")]
    NoRuntime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Transmitting,
}

pub type FailureHook = Arc<dyn Fn(&str, &SubmitError) + Send + Sync>;

/// A submission handed to the runtime. Dropping it leaves the request running.
pub struct Dispatched {
    payload: ReorderPayload,
    handle: JoinHandle<Result<(), SubmitError>>,
}

impl Dispatched {
    pub fn payload(&self) -> &ReorderPayload {
        &self.payload
    }

    /// Wait for the submission to finish.
    pub async fn outcome(self) -> Result<(), SubmitError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(SubmitError::Aborted(err.to_string())),
        }
    }
}

impl fmt::Debug for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatched")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

pub struct ReorderSynchronizer {
    binding: ReorderBinding,
    submitter: Arc<dyn PayloadSubmitter>,
    on_failure: Option<FailureHook>,
    state: SyncState,
}

impl ReorderSynchronizer {
    pub fn new(binding: ReorderBinding, submitter: Arc<dyn PayloadSubmitter>) -> Self {
        Self {
            binding,
            submitter,
            on_failure: None,
            state: SyncState::Idle,
        }
    }

    /// Install a callback that sees every failed submission.
    pub fn on_failure<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &SubmitError) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(hook));
        self
    }

    pub fn binding(&self) -> &ReorderBinding {
        &self.binding
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Handle the end of a drag gesture on `list`.
    ///
    /// Labels (when the binding shows them) and the payload are computed
    /// before this returns; the submission itself runs on the tokio runtime
    /// and is not awaited. Empty lists dispatch nothing. Without a runtime
    /// the list is left untouched and [`ReorderError::NoRuntime`] is returned.
    pub fn on_reorder_complete(
        &mut self,
        list: &mut OrderedList,
    ) -> Result<Option<Dispatched>, ReorderError> {
        if list.container_id() != self.binding.container_id {
            return Err(ReorderError::UnboundContainer {
                expected: self.binding.container_id.clone(),
                actual: list.container_id().to_string(),
            });
        }

        if list.is_empty() {
            return Ok(None);
        }

        let payload = ReorderPayload::from_sequence(list.ids().cloned())?;
        let runtime = Handle::try_current().map_err(|_| ReorderError::NoRuntime)?;

        if self.binding.update_labels {
            list.relabel();
        }

        self.state = SyncState::Transmitting;
        let handle = self.spawn_submission(&runtime, payload.clone());
        self.state = SyncState::Idle;

        Ok(Some(Dispatched { payload, handle }))
    }

    fn spawn_submission(
        &self,
        runtime: &Handle,
        payload: ReorderPayload,
    ) -> JoinHandle<Result<(), SubmitError>> {
        let submitter = self.submitter.clone();
        let on_failure = self.on_failure.clone();
        let endpoint = self.binding.endpoint.clone();
        let container = self.binding.container_id.clone();

        metrics::counter!("lectern_reorder_dispatch_total", "list" => container.clone())
            .increment(1);

        runtime.spawn(async move {
            let result = submitter.submit(&endpoint, &payload).await;
            match &result {
                Ok(()) => {
                    debug!(
                        target = "lectern::reorder",
                        list = %container,
                        endpoint = %endpoint,
                        items = payload.len(),
                        "order persisted"
                    );
                }
                Err(err) => {
                    metrics::counter!("lectern_reorder_failure_total", "list" => container.clone())
                        .increment(1);
                    warn!(
                        target = "lectern::reorder",
                        list = %container,
                        endpoint = %endpoint,
                        error = %err,
                        "order submission failed"
                    );
                    if let Some(hook) = on_failure.as_ref() {
                        hook(&endpoint, err);
                    }
                }
            }
            result
        })
    }
}

impl fmt::Debug for ReorderSynchronizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderSynchronizer")
            .field("binding", &self.binding)
            .field("state", &self.state)
            .field("has_failure_hook", &self.on_failure.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ordering::ItemId;

    #[derive(Default)]
    struct RecordingSubmitter {
        calls: Mutex<Vec<(String, ReorderPayload)>>,
        fail_with_status: Option<u16>,
    }

    impl RecordingSubmitter {
        fn failing(status: u16) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with_status: Some(status),
            }
        }

        fn calls(&self) -> Vec<(String, ReorderPayload)> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl PayloadSubmitter for RecordingSubmitter {
        async fn submit(&self, endpoint: &str, payload: &ReorderPayload) -> Result<(), SubmitError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((endpoint.to_string(), payload.clone()));
            match self.fail_with_status {
                Some(status) => Err(SubmitError::Status {
                    endpoint: endpoint.to_string(),
                    status,
                }),
                None => Ok(()),
            }
        }
    }

    fn module_synchronizer(submitter: Arc<RecordingSubmitter>) -> ReorderSynchronizer {
        ReorderSynchronizer::new(
            configure_reorder("modules", "/modules/order", true),
            submitter,
        )
    }

    #[tokio::test]
    async fn dragging_last_module_to_top_relabels_and_submits() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::labelled("modules", ["A", "B", "C"]);

        list.move_item(2, 0);
        let dispatched = sync
            .on_reorder_complete(&mut list)
            .expect("bound list")
            .expect("non-empty list dispatches");

        let labels: Vec<_> = list.labels().collect();
        assert_eq!(labels, [Some("1"), Some("2"), Some("3")]);
        assert_eq!(list.label_of(&ItemId::from("C")), Some("1"));
        assert_eq!(list.label_of(&ItemId::from("A")), Some("2"));
        assert_eq!(list.label_of(&ItemId::from("B")), Some("3"));

        assert_eq!(
            serde_json::to_value(dispatched.payload()).expect("json"),
            serde_json::json!({"C": 0, "A": 1, "B": 2})
        );

        dispatched.outcome().await.expect("submitted");
        let calls = submitter.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/modules/order");
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[tokio::test]
    async fn empty_list_sends_nothing() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::new("modules");

        let dispatched = sync.on_reorder_complete(&mut list).expect("bound list");

        assert!(dispatched.is_none());
        tokio::task::yield_now().await;
        assert!(submitter.calls().is_empty());
    }

    #[tokio::test]
    async fn unchanged_order_produces_identical_payloads() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::labelled("modules", ["x1", "x2", "x3"]);

        let first = sync
            .on_reorder_complete(&mut list)
            .expect("bound list")
            .expect("dispatched");
        let second = sync
            .on_reorder_complete(&mut list)
            .expect("bound list")
            .expect("dispatched");

        assert_eq!(first.payload(), second.payload());
        first.outcome().await.expect("first");
        second.outcome().await.expect("second");
        assert_eq!(submitter.calls().len(), 2);
    }

    #[tokio::test]
    async fn content_list_keeps_its_labels() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = ReorderSynchronizer::new(
            configure_reorder("contents", "/content/order", false),
            submitter.clone(),
        );
        let mut list = OrderedList::from_ids("contents", ["t", "v"]);
        list.move_item(1, 0);

        let dispatched = sync
            .on_reorder_complete(&mut list)
            .expect("bound list")
            .expect("dispatched");

        assert!(list.labels().all(|label| label.is_none()));
        assert_eq!(dispatched.payload().position(&ItemId::from("v")), Some(0));
        dispatched.outcome().await.expect("submitted");
        assert_eq!(submitter.calls()[0].0, "/content/order");
    }

    #[tokio::test]
    async fn failures_reach_the_hook() {
        let submitter = Arc::new(RecordingSubmitter::failing(500));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_hook = seen.clone();
        let mut sync = module_synchronizer(submitter).on_failure(move |endpoint, err| {
            seen_in_hook
                .lock()
                .expect("seen lock")
                .push(format!("{endpoint}: {err}"));
        });
        let mut list = OrderedList::labelled("modules", ["A"]);

        let dispatched = sync
            .on_reorder_complete(&mut list)
            .expect("bound list")
            .expect("dispatched");
        let outcome = dispatched.outcome().await;

        assert!(matches!(outcome, Err(SubmitError::Status { status: 500, .. })));
        let seen = seen.lock().expect("seen lock");
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("/modules/order"));
    }

    #[tokio::test]
    async fn lists_from_other_containers_are_rejected() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::from_ids("contents", ["A"]);

        let err = sync.on_reorder_complete(&mut list).expect_err("unbound");

        assert!(matches!(err, ReorderError::UnboundContainer { .. }));
        assert!(submitter.calls().is_empty());
    }

    #[tokio::test]
    async fn duplicate_children_are_not_submitted() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::from_ids("modules", ["A", "A"]);

        let err = sync.on_reorder_complete(&mut list).expect_err("duplicate");

        assert!(matches!(
            err,
            ReorderError::Payload(PayloadError::DuplicateId(_))
        ));
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn without_a_runtime_the_list_is_left_alone() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::labelled("modules", ["A", "B"]);
        list.move_item(1, 0);
        let before: Vec<Option<String>> = list.labels().map(|l| l.map(str::to_string)).collect();

        let err = sync.on_reorder_complete(&mut list).expect_err("no runtime");

        assert!(matches!(err, ReorderError::NoRuntime));
        let after: Vec<Option<String>> = list.labels().map(|l| l.map(str::to_string)).collect();
        assert_eq!(before, after);
        assert_eq!(sync.state(), SyncState::Idle);
        assert!(submitter.calls().is_empty());
    }

    fn permutations(items: Vec<usize>) -> Vec<Vec<usize>> {
        if items.len() <= 1 {
            return vec![items];
        }
        let mut out = Vec::new();
        for index in 0..items.len() {
            let mut rest = items.clone();
            let head = rest.remove(index);
            for mut tail in permutations(rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    /// Drag items one by one until the list shows `target` top to bottom.
    fn drag_into(list: &mut OrderedList, target: &[String]) {
        for (slot, id) in target.iter().enumerate() {
            let from = list
                .ids()
                .position(|current| current.as_str() == id)
                .expect("item present");
            assert!(list.move_item(from, slot));
        }
    }

    #[tokio::test]
    async fn every_permutation_maps_each_item_to_its_visual_position() {
        for size in 0..=5usize {
            let names: Vec<String> = (0..size).map(|i| format!("item-{i}")).collect();
            for update_labels in [true, false] {
                for perm in permutations((0..size).collect()) {
                    let target: Vec<String> = perm.iter().map(|&i| names[i].clone()).collect();
                    let submitter = Arc::new(RecordingSubmitter::default());
                    let mut sync = ReorderSynchronizer::new(
                        configure_reorder("modules", "/modules/order", update_labels),
                        submitter.clone(),
                    );
                    let mut list = if update_labels {
                        OrderedList::labelled("modules", names.clone())
                    } else {
                        OrderedList::from_ids("modules", names.clone())
                    };
                    drag_into(&mut list, &target);

                    let dispatched = sync.on_reorder_complete(&mut list).expect("bound list");
                    let Some(dispatched) = dispatched else {
                        assert_eq!(size, 0);
                        continue;
                    };

                    let payload = dispatched.payload();
                    assert_eq!(payload.len(), size);
                    let mut positions: Vec<u32> = payload.iter().map(|(_, p)| p).collect();
                    positions.sort_unstable();
                    assert_eq!(positions, (0..size as u32).collect::<Vec<_>>());
                    for (index, id) in target.iter().enumerate() {
                        let id = ItemId::from(id.as_str());
                        assert_eq!(payload.position(&id), Some(index as u32));
                        if update_labels {
                            let expected = (index + 1).to_string();
                            assert_eq!(list.label_of(&id), Some(expected.as_str()));
                        } else {
                            assert_eq!(list.label_of(&id), None);
                        }
                    }

                    dispatched.outcome().await.expect("submitted");
                    assert_eq!(submitter.calls().len(), 1);
                }
            }
        }
    }

    #[tokio::test]
    async fn single_item_lists_sit_at_position_zero() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let mut sync = module_synchronizer(submitter.clone());
        let mut list = OrderedList::labelled("modules", ["only"]);

        let dispatched = sync
            .on_reorder_complete(&mut list)
            .expect("bound list")
            .expect("dispatched");

        assert_eq!(
            serde_json::to_value(dispatched.payload()).expect("json"),
            serde_json::json!({"only": 0})
        );
        assert_eq!(list.label_of(&ItemId::from("only")), Some("1"));
        dispatched.outcome().await.expect("submitted");
    }
}
