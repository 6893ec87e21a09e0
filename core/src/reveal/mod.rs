//! Text Reveal
//!
//! Time-driven engines that turn a target string into a sequence of frames:
//!
//! - [`WordReveal`]: one token per tick, each with a fade/slide entrance
//! - [`ScrambleReveal`]: random glyphs that lock onto the target
//!
//! Engines are plain state machines. [`RevealTask`] drives one on a tokio
//! interval and publishes frames over a watch channel; dropping the task
//! cancels its timer. [`Revealer`] hosts at most one task and restarts it
//! when the displayed text changes.

mod scramble;
mod timing;
mod words;

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub use scramble::{ScrambleFrame, ScrambleOrder, ScrambleReveal, DEFAULT_ALPHABET};
pub use timing::{EasingFunction, Entrance, EntranceDirection};
pub use words::{tokenize, Granularity, WordFrame, WordReveal, WordToken};

/// A reveal state machine advanced by a timer
pub trait RevealEngine: Send + 'static {
    /// What a surface draws
    type Frame: Clone + Send + Sync + 'static;

    /// Start over with a new target
    fn restart(&mut self, source: &str);

    /// Advance one step (no-op once complete)
    fn tick(&mut self);

    /// Whether the terminal frame has been reached
    fn is_complete(&self) -> bool;

    /// The current frame
    fn frame(&self) -> Self::Frame;
}

/// A published frame with its progress
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSnapshot<F> {
    /// Current frame
    pub frame: F,
    /// Ticks applied since the restart
    pub ticks: usize,
    /// Whether this is the terminal frame
    pub complete: bool,
}

/// A running reveal
///
/// The timer stops by itself on the terminal frame and is aborted when the
/// task is dropped, so no tick ever lands after a restart.
pub struct RevealTask<F> {
    handle: JoinHandle<()>,
    snapshots: watch::Receiver<RevealSnapshot<F>>,
}

impl<F: Clone + Send + Sync + 'static> RevealTask<F> {
    /// Drive `engine` (already restarted) one tick per `interval`
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn<E>(mut engine: E, interval: Duration) -> Self
    where
        E: RevealEngine<Frame = F>,
    {
        let initial = RevealSnapshot {
            frame: engine.frame(),
            ticks: 0,
            complete: engine.is_complete(),
        };
        let (tx, snapshots) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut ticks = 0;
            while !engine.is_complete() {
                ticker.tick().await;
                engine.tick();
                ticks += 1;

                let snapshot = RevealSnapshot {
                    frame: engine.frame(),
                    ticks,
                    complete: engine.is_complete(),
                };
                if tx.send(snapshot).is_err() {
                    tracing::trace!("Reveal observers gone, stopping timer");
                    return;
                }
            }
        });

        Self { handle, snapshots }
    }

    /// Latest snapshot
    #[must_use]
    pub fn snapshot(&self) -> RevealSnapshot<F> {
        self.snapshots.borrow().clone()
    }

    /// Latest frame
    #[must_use]
    pub fn frame(&self) -> F {
        self.snapshots.borrow().frame.clone()
    }

    /// Whether the terminal frame has been published
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.snapshots.borrow().complete
    }

    /// A receiver that wakes on every new frame
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RevealSnapshot<F>> {
        self.snapshots.clone()
    }

    /// Wait for the terminal frame
    pub async fn finished(&mut self) -> RevealSnapshot<F> {
        loop {
            if self.snapshots.borrow_and_update().complete {
                break;
            }
            if self.snapshots.changed().await.is_err() {
                break;
            }
        }
        self.snapshot()
    }
}

impl<F> Drop for RevealTask<F> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct ActiveReveal<F> {
    source: String,
    task: RevealTask<F>,
}

/// Hosts one reveal at a time, restarting on a new target
pub struct Revealer<E: RevealEngine> {
    template: E,
    interval: Duration,
    active: Option<ActiveReveal<E::Frame>>,
}

impl<E: RevealEngine + Clone> Revealer<E> {
    /// Create a host that clones `template` for every reveal
    pub fn new(template: E, interval: Duration) -> Self {
        Self {
            template,
            interval,
            active: None,
        }
    }

    /// Show `source`, restarting only if it differs from the current target
    ///
    /// Returns whether a new reveal started. Must be called inside a tokio
    /// runtime.
    pub fn show(&mut self, source: &str) -> bool {
        if self.source() == Some(source) {
            return false;
        }

        // Cancel the previous timer before starting the next one
        self.active = None;

        let mut engine = self.template.clone();
        engine.restart(source);
        tracing::debug!(chars = source.chars().count(), "Starting reveal");

        self.active = Some(ActiveReveal {
            source: source.to_string(),
            task: RevealTask::spawn(engine, self.interval),
        });
        true
    }

    /// Stop and forget the current reveal
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Current target
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.source.as_str())
    }

    /// Current frame
    #[must_use]
    pub fn frame(&self) -> Option<E::Frame> {
        self.active.as_ref().map(|a| a.task.frame())
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Option<RevealSnapshot<E::Frame>> {
        self.active.as_ref().map(|a| a.task.snapshot())
    }

    /// Whether a reveal is shown and has reached its terminal frame
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.task.is_complete())
    }

    /// The running task, if any
    pub fn task_mut(&mut self) -> Option<&mut RevealTask<E::Frame>> {
        self.active.as_mut().map(|a| &mut a.task)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TICK: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn test_task_reveals_one_word_per_interval() {
        let mut engine = WordReveal::default();
        engine.restart("How do you feel today?");
        let mut task = RevealTask::spawn(engine, TICK);

        assert_eq!(task.frame().visible, 0);

        tokio::time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(task.frame().visible_text(), "How ");

        tokio::time::sleep(TICK * 2).await;
        assert_eq!(task.frame().visible_text(), "How do you ");

        let last = task.finished().await;
        assert!(last.complete);
        assert_eq!(last.ticks, 5);
        assert_eq!(last.frame.visible_text(), "How do you feel today?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_with_empty_source_is_complete_immediately() {
        let mut engine = WordReveal::default();
        engine.restart("");
        let mut task = RevealTask::spawn(engine, TICK);
        assert!(task.is_complete());
        assert_eq!(task.finished().await.ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_task_stops_ticking() {
        let mut engine = ScrambleReveal::default().with_seed(1);
        engine.restart("Positive");
        let task = RevealTask::spawn(engine, TICK);
        let mut frames = task.subscribe();
        drop(task);

        tokio::time::sleep(TICK * 20).await;
        // Sender side is gone with the aborted task
        assert!(frames.changed().await.is_err());
        assert_eq!(frames.borrow().ticks, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revealer_restarts_only_on_change() {
        let mut revealer = Revealer::new(WordReveal::default(), TICK);
        assert!(revealer.frame().is_none());
        assert!(!revealer.is_complete());

        assert!(revealer.show("Positive"));
        revealer.task_mut().unwrap().finished().await;
        assert!(revealer.is_complete());

        // Same text: no new animation
        assert!(!revealer.show("Positive"));
        assert!(revealer.is_complete());

        assert!(revealer.show("Error analyzing sentiment"));
        assert!(!revealer.is_complete());
        assert_eq!(revealer.source(), Some("Error analyzing sentiment"));
        assert_eq!(revealer.frame().unwrap().visible, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_reveal_discards_old_ticks() {
        let mut revealer = Revealer::new(WordReveal::default(), TICK);
        revealer.show("one two three four five");
        tokio::time::sleep(TICK * 2 + Duration::from_millis(1)).await;
        assert_eq!(revealer.frame().unwrap().visible, 2);

        revealer.show("alpha beta");
        assert_eq!(revealer.frame().unwrap().visible, 0);

        tokio::time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(revealer.frame().unwrap().visible_text(), "alpha ");

        let last = revealer.task_mut().unwrap().finished().await;
        assert_eq!(last.ticks, 2);
        assert_eq!(last.frame.visible_text(), "alpha beta");
    }

    #[tokio::test(start_paused = true)]
    async fn test_scramble_revealer_ends_on_target() {
        let config = crate::config::RevealConfig::default();
        let mut revealer = Revealer::scramble(&config);
        revealer.show("Neutral");

        let last = revealer.task_mut().unwrap().finished().await;
        assert_eq!(last.frame.text, "Neutral");
        assert_eq!(last.ticks, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear() {
        let mut revealer = Revealer::words(&crate::config::RevealConfig::default());
        revealer.show("hello");
        revealer.clear();
        assert!(revealer.source().is_none());
        // Showing the same text again after a clear restarts it
        assert!(revealer.show("hello"));
    }
}
