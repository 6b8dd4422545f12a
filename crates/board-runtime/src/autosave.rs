//! Autosave controller
//!
//! Decouples high-frequency local edits from network writes. The graph
//! notifies the controller's sink on every mutation; each notification
//! resets a single debounce timer, and when the timer fires exactly one
//! `save_canvas` call carries the entire current snapshot (never a
//! diff). A manual "save now" cancels the timer and persists
//! immediately, and `flush` persists any pending snapshot before a
//! canvas switch or unmount so the last debounce window is never
//! silently dropped.
//!
//! Failure policy: a failed save is logged and local state stays
//! authoritative; there is no automatic retry, the next mutation's
//! debounce cycle carries the further-diverged snapshot. A save whose
//! activation generation is no longer current is discarded rather than
//! written against the wrong canvas.

use crate::active::ActiveCanvas;
use crate::error::BoardError;
use board_collab::CanvasStore;
use board_core::{CanvasId, CanvasSnapshot, MutationSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// One snapshot waiting (or asked) to be persisted
struct PendingSave {
    canvas: CanvasId,
    name: String,
    generation: u64,
    snapshot: CanvasSnapshot,
}

enum Command {
    /// Debounced: reset the timer with this snapshot
    Snapshot(PendingSave),
    /// Immediate: cancel the timer and persist now
    SaveNow {
        save: PendingSave,
        ack: oneshot::Sender<Result<(), BoardError>>,
    },
    /// Persist any pending snapshot now (canvas switch / unmount)
    Flush { ack: oneshot::Sender<()> },
}

/// Debounced persistence of graph snapshots
pub struct AutosaveController {
    tx: mpsc::UnboundedSender<Command>,
    active: Arc<ActiveCanvas>,
    task: JoinHandle<()>,
}

impl AutosaveController {
    /// Spawn the controller task
    #[must_use]
    pub fn spawn(
        store: Arc<dyn CanvasStore>,
        active: Arc<ActiveCanvas>,
        debounce: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, store, active.clone(), debounce));
        Self { tx, active, task }
    }

    /// Mutation sink to subscribe on the graph model
    #[must_use]
    pub fn sink(&self) -> Arc<dyn MutationSink> {
        Arc::new(AutosaveSink {
            tx: self.tx.clone(),
            active: self.active.clone(),
        })
    }

    /// Cancel any pending timer and persist `snapshot` immediately
    ///
    /// # Errors
    /// `NoActiveCanvas` before any canvas is loaded; `Persistence` when
    /// the store rejects the save (local state stays authoritative).
    pub async fn save_now(&self, snapshot: CanvasSnapshot) -> Result<(), BoardError> {
        let (canvas, name, generation) = self
            .active
            .current()
            .ok_or(BoardError::NoActiveCanvas)?;
        let (ack, rx) = oneshot::channel();
        self.tx
            .send(Command::SaveNow {
                save: PendingSave {
                    canvas,
                    name,
                    generation,
                    snapshot,
                },
                ack,
            })
            .map_err(|_| BoardError::ControllerStopped)?;
        rx.await.map_err(|_| BoardError::ControllerStopped)?
    }

    /// Persist any pending snapshot now
    ///
    /// Called before switching canvases and on unmount; a failed save
    /// is logged by the task, not surfaced here.
    ///
    /// # Errors
    /// `ControllerStopped` if the task is gone.
    pub async fn flush(&self) -> Result<(), BoardError> {
        let (ack, rx) = oneshot::channel();
        self.tx
            .send(Command::Flush { ack })
            .map_err(|_| BoardError::ControllerStopped)?;
        rx.await.map_err(|_| BoardError::ControllerStopped)
    }

    /// Flush and stop the controller task
    pub async fn shutdown(self) {
        // Closing the channel makes the task flush pending work and exit
        drop(self.tx);
        let _ = self.task.await;
    }
}

struct AutosaveSink {
    tx: mpsc::UnboundedSender<Command>,
    active: Arc<ActiveCanvas>,
}

impl MutationSink for AutosaveSink {
    fn snapshot_changed(&self, snapshot: &CanvasSnapshot) {
        let Some((canvas, name, generation)) = self.active.current() else {
            tracing::debug!("graph mutation with no active canvas; nothing scheduled");
            return;
        };
        tracing::debug!(%canvas, "debounce window reset");
        let _ = self.tx.send(Command::Snapshot(PendingSave {
            canvas,
            name,
            generation,
            snapshot: snapshot.clone(),
        }));
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<Command>,
    store: Arc<dyn CanvasStore>,
    active: Arc<ActiveCanvas>,
    debounce: Duration,
) {
    let mut pending: Option<(PendingSave, Instant)> = None;
    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Snapshot(save)) => {
                    pending = Some((save, Instant::now() + debounce));
                }
                Some(Command::SaveNow { save, ack }) => {
                    // The manual save supersedes whatever was pending
                    pending = None;
                    let result = persist(store.as_ref(), &active, &save).await;
                    if let Err(error) = &result {
                        tracing::error!(canvas = %save.canvas, %error, "manual save failed; local state kept");
                    }
                    let _ = ack.send(result);
                }
                Some(Command::Flush { ack }) => {
                    if let Some((save, _)) = pending.take() {
                        dispatch(store.as_ref(), &active, save).await;
                    }
                    let _ = ack.send(());
                }
                None => {
                    if let Some((save, _)) = pending.take() {
                        dispatch(store.as_ref(), &active, save).await;
                    }
                    break;
                }
            },
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some((save, _)) = pending.take() {
                    dispatch(store.as_ref(), &active, save).await;
                }
            }
        }
    }
}

/// Persist with log-only error handling (debounce fire, flush, shutdown)
async fn dispatch(store: &dyn CanvasStore, active: &ActiveCanvas, save: PendingSave) {
    let canvas = save.canvas;
    match persist(store, active, &save).await {
        Ok(()) => {}
        Err(BoardError::StaleCanvasResponse { .. }) => {
            tracing::warn!(%canvas, "discarding save for no-longer-active canvas");
        }
        Err(error) => {
            tracing::error!(%canvas, %error, "canvas save failed; local state kept");
        }
    }
}

async fn persist(
    store: &dyn CanvasStore,
    active: &ActiveCanvas,
    save: &PendingSave,
) -> Result<(), BoardError> {
    if active.generation() != save.generation {
        return Err(BoardError::StaleCanvasResponse {
            canvas: save.canvas,
        });
    }
    store
        .save_canvas(save.canvas, &save.snapshot, Some(&save.name))
        .await?;
    tracing::info!(
        canvas = %save.canvas,
        nodes = save.snapshot.nodes.len(),
        edges = save.snapshot.edges.len(),
        "canvas saved"
    );
    Ok(())
}
