//! Request Orchestrator
//!
//! Owns the single [`RequestState`] cell and the one classification that may
//! be in flight. The remote call runs on a spawned task that only hands its
//! result back through a oneshot channel; the state itself changes only when
//! the host calls [`RequestOrchestrator::poll`] (from its frame loop) or
//! [`RequestOrchestrator::settle`].
//!
//! A submission while a request is pending is ignored. Dropping the
//! orchestrator mid-request discards the eventual response.

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::backend::{ClassifyError, SentimentBackend};
use crate::state::{DisplayText, RequestState, SentimentLabel, SubmissionId, SubmitOutcome};

type Completion = Result<SentimentLabel, ClassifyError>;

/// The request currently awaiting a response
struct InFlight {
    submission: SubmissionId,
    rx: oneshot::Receiver<Completion>,
}

/// Drives submissions against a [`SentimentBackend`]
pub struct RequestOrchestrator<B: SentimentBackend + 'static> {
    /// Shared with the request task
    backend: Arc<B>,
    /// Observable request state
    state: watch::Sender<RequestState>,
    /// Pending request, if any
    in_flight: Option<InFlight>,
}

impl<B: SentimentBackend + 'static> RequestOrchestrator<B> {
    /// Create an idle orchestrator
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            backend: Arc::new(backend),
            state,
            in_flight: None,
        }
    }

    /// The backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Submit `text` for classification
    ///
    /// Empty text is sent as-is. Returns [`SubmitOutcome::Ignored`] without
    /// touching anything if a request is already pending. Must be called
    /// inside a tokio runtime.
    pub fn submit(&mut self, text: impl Into<String>) -> SubmitOutcome {
        if self.is_in_flight() {
            tracing::debug!("Submission ignored, request already in flight");
            return SubmitOutcome::Ignored;
        }

        let text = text.into();
        let submission = SubmissionId::next();
        let (tx, rx) = oneshot::channel();
        let backend = Arc::clone(&self.backend);

        tracing::info!(
            submission = %submission,
            backend = backend.name(),
            chars = text.chars().count(),
            "Submitting text for classification"
        );

        tokio::spawn(async move {
            let result = backend.classify(&text).await;
            if tx.send(result).is_err() {
                tracing::debug!(submission = %submission, "Orchestrator gone, discarding response");
            }
        });

        self.in_flight = Some(InFlight { submission, rx });
        self.state.send_replace(RequestState::Pending);

        SubmitOutcome::Accepted { submission }
    }

    /// Apply a finished response without waiting
    ///
    /// Call this regularly from the host loop. Returns true if the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };

        let result = match flight.rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => Err(ClassifyError::Dropped),
        };

        self.complete(result);
        true
    }

    /// Wait for the pending response and apply it
    ///
    /// Returns false immediately if nothing is in flight.
    pub async fn settle(&mut self) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };

        let result = (&mut flight.rx)
            .await
            .unwrap_or(Err(ClassifyError::Dropped));

        self.complete(result);
        true
    }

    /// Current request state
    #[must_use]
    pub fn current_state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Whether a request is pending
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Observe every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Stream of settled display values
    ///
    /// Yields the current value first if already settled. Intermediate
    /// states may be coalesced if the consumer falls behind.
    pub fn display_stream(&self) -> impl Stream<Item = DisplayText> + Send + 'static {
        WatchStream::new(self.subscribe()).filter_map(|state| state.display_text())
    }

    fn complete(&mut self, result: Completion) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };

        let next = match result {
            Ok(label) => {
                tracing::info!(submission = %flight.submission, label = %label, "Classification succeeded");
                RequestState::Succeeded(label)
            }
            Err(e) => {
                tracing::warn!(
                    submission = %flight.submission,
                    error = %e,
                    kind = %e.kind(),
                    "Classification failed"
                );
                RequestState::failed()
            }
        };

        self.state.send_replace(next);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    use super::*;
    use crate::state::{Tone, FAILURE_REASON};

    #[derive(Clone, Copy)]
    enum Reply {
        Label(&'static str),
        Status(u16),
        Panic,
    }

    struct MockBackend {
        reply: Reply,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl MockBackend {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(reply: Reply, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(reply)
            }
        }
    }

    #[async_trait]
    impl SentimentBackend for MockBackend {
        fn name(&self) -> &str {
            "Mock"
        }

        async fn classify(&self, _text: &str) -> Result<SentimentLabel, ClassifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.reply {
                Reply::Label(label) => Ok(SentimentLabel::new(label)),
                Reply::Status(status) => Err(ClassifyError::Status {
                    status,
                    body: String::new(),
                }),
                Reply::Panic => panic!("backend blew up"),
            }
        }
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Label("Positive")));
        assert_eq!(orchestrator.current_state(), RequestState::Idle);
        assert!(!orchestrator.is_in_flight());
    }

    #[tokio::test]
    async fn test_success_uses_label_verbatim() {
        let mut orchestrator =
            RequestOrchestrator::new(MockBackend::new(Reply::Label("Positive")));

        let outcome = orchestrator.submit("I am so happy today");
        assert!(outcome.is_accepted());
        assert_eq!(orchestrator.current_state(), RequestState::Pending);
        assert!(orchestrator.is_in_flight());

        assert!(orchestrator.settle().await);
        assert_eq!(
            orchestrator.current_state(),
            RequestState::Succeeded("Positive".into())
        );
        assert!(!orchestrator.is_in_flight());
    }

    #[tokio::test]
    async fn test_empty_text_is_submitted() {
        let mut orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Label("Mixed")));
        assert!(orchestrator.submit("").is_accepted());
        orchestrator.settle().await;
        assert_eq!(
            orchestrator.current_state(),
            RequestState::Succeeded("Mixed".into())
        );
    }

    #[tokio::test]
    async fn test_failure_uses_fixed_reason() {
        let mut orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Status(400)));
        orchestrator.submit("");
        orchestrator.settle().await;
        assert_eq!(
            orchestrator.current_state(),
            RequestState::Failed(FAILURE_REASON.to_string())
        );
    }

    #[tokio::test]
    async fn test_panicked_request_task_fails() {
        let mut orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Panic));
        orchestrator.submit("boom");
        orchestrator.settle().await;
        assert_eq!(orchestrator.current_state(), RequestState::failed());
        assert!(!orchestrator.is_in_flight());
    }

    #[tokio::test]
    async fn test_panicked_request_task_fails_through_poll() {
        let mut orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Panic));
        orchestrator.submit("boom");
        assert!(!orchestrator.poll());
        assert_eq!(orchestrator.current_state(), RequestState::Pending);

        // Frame loop: poll until the dead task is noticed
        let mut changed = false;
        for _ in 0..100 {
            tokio::task::yield_now().await;
            if orchestrator.poll() {
                changed = true;
                break;
            }
        }

        assert!(changed);
        assert_eq!(orchestrator.current_state(), RequestState::failed());
        assert!(!orchestrator.is_in_flight());
        assert!(!orchestrator.poll());
    }

    #[tokio::test]
    async fn test_submit_while_pending_is_ignored() {
        let gate = Arc::new(Notify::new());
        let mut orchestrator = RequestOrchestrator::new(MockBackend::gated(
            Reply::Label("Positive"),
            Arc::clone(&gate),
        ));

        let first = orchestrator.submit("first");
        assert!(first.is_accepted());
        assert_eq!(orchestrator.submit("second"), SubmitOutcome::Ignored);
        assert_eq!(orchestrator.submit("third"), SubmitOutcome::Ignored);
        assert_eq!(orchestrator.current_state(), RequestState::Pending);

        gate.notify_one();
        orchestrator.settle().await;

        assert_eq!(orchestrator.backend().calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            orchestrator.current_state(),
            RequestState::Succeeded("Positive".into())
        );
    }

    #[tokio::test]
    async fn test_poll_applies_on_caller_loop() {
        let gate = Arc::new(Notify::new());
        let mut orchestrator = RequestOrchestrator::new(MockBackend::gated(
            Reply::Label("Negative"),
            Arc::clone(&gate),
        ));

        assert!(!orchestrator.poll());
        orchestrator.submit("I hate Mondays");

        tokio::task::yield_now().await;
        assert!(!orchestrator.poll());
        assert_eq!(orchestrator.current_state(), RequestState::Pending);

        gate.notify_one();
        tokio::time::timeout(Duration::from_secs(1), async {
            while !orchestrator.poll() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        assert_eq!(
            orchestrator.current_state(),
            RequestState::Succeeded("Negative".into())
        );
        assert!(!orchestrator.poll());
    }

    #[tokio::test]
    async fn test_settle_without_request() {
        let mut orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Label("x")));
        assert!(!orchestrator.settle().await);
    }

    #[tokio::test]
    async fn test_resubmit_after_settle() {
        let mut orchestrator = RequestOrchestrator::new(MockBackend::new(Reply::Label("Neutral")));
        orchestrator.submit("one");
        orchestrator.settle().await;
        assert!(orchestrator.submit("two").is_accepted());
        assert_eq!(orchestrator.current_state(), RequestState::Pending);
        orchestrator.settle().await;
        assert_eq!(orchestrator.backend().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let mut orchestrator =
            RequestOrchestrator::new(MockBackend::new(Reply::Label("Positive")));
        let mut rx = orchestrator.subscribe();

        orchestrator.submit("hello");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), RequestState::Pending);

        orchestrator.settle().await;
        assert_eq!(*rx.borrow_and_update(), RequestState::Succeeded("Positive".into()));
    }

    #[tokio::test]
    async fn test_display_stream_yields_settled_values() {
        let mut orchestrator =
            RequestOrchestrator::new(MockBackend::new(Reply::Label("Positive")));
        let mut stream = Box::pin(orchestrator.display_stream());

        orchestrator.submit("I am so happy today");
        orchestrator.settle().await;

        let shown = stream.next().await.unwrap();
        assert_eq!(shown.text, "Positive");
        assert_eq!(shown.tone, Tone::Positive);
    }
}
