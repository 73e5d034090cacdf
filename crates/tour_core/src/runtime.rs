//! Tokio driver for [`TourOrchestrator`].
//!
//! One task owns the orchestrator. Commands arrive over an mpsc queue, timers
//! are spawned sleep tasks that report back with their token, and effects are
//! dispatched to the collaborators in the order the orchestrator queued them.
//! Page motion runs in its own task so a long exit sequence never blocks the
//! command loop.

use std::{collections::HashMap, time::Duration};

use shared::{
    domain::{DetailTicket, PartId, TimerRole, View},
    protocol::{TourCommand, TourSnapshot},
};
use thiserror::Error;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        watch,
    },
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    collaborators::Collaborators, effect::TourEffect, orchestrator::TourOrchestrator,
    timer::TimerToken,
};

const COMMAND_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("tour runtime has shut down")]
    Closed,
    #[error("tour command queue is full")]
    QueueFull,
}

struct ArmedTask {
    token: TimerToken,
    task: JoinHandle<()>,
}

pub struct TourRuntime {
    orchestrator: TourOrchestrator,
    collaborators: Collaborators,
    cmd_rx: mpsc::Receiver<TourCommand>,
    timer_tx: mpsc::UnboundedSender<(TimerRole, TimerToken)>,
    timer_rx: mpsc::UnboundedReceiver<(TimerRole, TimerToken)>,
    timers: HashMap<TimerRole, ArmedTask>,
    motion_tasks: Vec<JoinHandle<()>>,
    snapshot_tx: watch::Sender<TourSnapshot>,
}

impl TourRuntime {
    pub fn new(orchestrator: TourOrchestrator, collaborators: Collaborators) -> (Self, TourHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshots) = watch::channel(orchestrator.snapshot());

        let runtime = Self {
            orchestrator,
            collaborators,
            cmd_rx,
            timer_tx,
            timer_rx,
            timers: HashMap::new(),
            motion_tasks: Vec::new(),
            snapshot_tx,
        };
        (runtime, TourHandle { cmd_tx, snapshots })
    }

    /// Spawns [`TourRuntime::run`] on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until the tour is dismissed or every handle is dropped.
    pub async fn run(mut self) {
        self.orchestrator.start();
        self.flush().await;

        loop {
            tokio::select! {
                command = self.cmd_rx.recv() => {
                    let Some(command) = command else {
                        debug!("all tour handles dropped");
                        break;
                    };
                    debug!(command = command.name(), "applying tour command");
                    self.orchestrator.apply(command);
                }
                Some((role, token)) = self.timer_rx.recv() => {
                    if self.timers.get(&role).is_some_and(|armed| armed.token == token) {
                        self.timers.remove(&role);
                    }
                    self.orchestrator.on_timer(role, token);
                }
            }

            self.flush().await;
            if self.orchestrator.is_dismissed() {
                break;
            }
        }

        self.shutdown().await;
    }

    async fn flush(&mut self) {
        for effect in self.orchestrator.take_effects() {
            self.dispatch(effect).await;
        }
        self.snapshot_tx.send_replace(self.orchestrator.snapshot());
    }

    async fn dispatch(&mut self, effect: TourEffect) {
        let result = match effect {
            TourEffect::StageChanged { from, to } => {
                debug!(from = %from, to = %to, "stage transition dispatched");
                Ok(())
            }
            TourEffect::RenderStage(stage) => self.collaborators.viewer.render(stage).await,
            TourEffect::ShowDetail(detail) => self.collaborators.presenter.show_detail(detail).await,
            TourEffect::CloseDetail => self.collaborators.presenter.close_detail().await,
            TourEffect::ShowSlide(slide) => self.collaborators.presenter.show_slide(slide).await,
            TourEffect::CloseSlideshow => self.collaborators.presenter.close_slideshow().await,
            TourEffect::HighlightFeature(index) => {
                self.collaborators.viewer.highlight_feature(index).await
            }
            TourEffect::ShowGallery(image) => self.collaborators.viewer.show_gallery(image).await,
            TourEffect::CloseGallery => self.collaborators.viewer.close_gallery().await,
            TourEffect::ScrollNudge => {
                let motion = self.collaborators.motion.clone();
                self.spawn_motion(async move { motion.scroll_nudge().await }, "scroll nudge");
                Ok(())
            }
            TourEffect::RunExitSequence => {
                let motion = self.collaborators.motion.clone();
                info!("starting exit sequence");
                self.spawn_motion(async move { motion.run_exit_sequence().await }, "exit sequence");
                Ok(())
            }
            TourEffect::HaltMotion => {
                self.halt_motion();
                Ok(())
            }
            TourEffect::ArmTimer { role, token, delay } => {
                self.arm_timer(role, token, delay);
                Ok(())
            }
            TourEffect::CancelTimer { role, token } => {
                self.cancel_timer(role, token);
                Ok(())
            }
        };

        if let Err(err) = result {
            warn!(error = %err, "tour collaborator call failed");
        }
    }

    fn arm_timer(&mut self, role: TimerRole, token: TimerToken, delay: Duration) {
        let timer_tx = self.timer_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = timer_tx.send((role, token));
        });
        if let Some(previous) = self.timers.insert(role, ArmedTask { token, task }) {
            previous.task.abort();
        }
    }

    fn cancel_timer(&mut self, role: TimerRole, token: TimerToken) {
        if self
            .timers
            .get(&role)
            .is_some_and(|armed| armed.token == token)
        {
            if let Some(armed) = self.timers.remove(&role) {
                armed.task.abort();
            }
        }
    }

    fn spawn_motion<F>(&mut self, motion: F, label: &'static str)
    where
        F: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.motion_tasks.retain(|task| !task.is_finished());
        self.motion_tasks.push(tokio::spawn(async move {
            if let Err(err) = motion.await {
                warn!(error = %err, motion = label, "page motion failed");
            }
        }));
    }

    fn halt_motion(&mut self) {
        for task in self.motion_tasks.drain(..) {
            if !task.is_finished() {
                debug!("aborting page motion");
                task.abort();
            }
        }
    }

    async fn shutdown(mut self) {
        for (_, armed) in self.timers.drain() {
            armed.task.abort();
        }
        // A dismissed (not stopped) tour still lets an exit sequence that
        // already started reach its navigation.
        for task in self.motion_tasks.drain(..) {
            let _ = task.await;
        }
        debug!("tour runtime stopped");
    }
}

#[derive(Clone)]
pub struct TourHandle {
    cmd_tx: mpsc::Sender<TourCommand>,
    snapshots: watch::Receiver<TourSnapshot>,
}

impl TourHandle {
    pub async fn send(&self, command: TourCommand) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    /// Queues a command without waiting, for callers outside async code.
    pub fn try_send(&self, command: TourCommand) -> Result<(), RuntimeError> {
        let name = command.name();
        match self.cmd_tx.try_send(command) {
            Ok(()) => {
                debug!(command = name, "queued tour command");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                warn!(command = name, "tour command queue is full");
                Err(RuntimeError::QueueFull)
            }
            Err(TrySendError::Closed(_)) => {
                warn!(command = name, "tour runtime is gone");
                Err(RuntimeError::Closed)
            }
        }
    }

    pub async fn stop(&self) -> Result<(), RuntimeError> {
        self.send(TourCommand::Stop).await
    }

    pub async fn restart(&self) -> Result<(), RuntimeError> {
        self.send(TourCommand::Restart).await
    }

    pub async fn dismiss(&self) -> Result<(), RuntimeError> {
        self.send(TourCommand::Dismiss).await
    }

    pub async fn skip(&self, ticket: DetailTicket) -> Result<(), RuntimeError> {
        self.send(TourCommand::SkipRequested { ticket }).await
    }

    pub async fn click(&self, part_id: PartId) -> Result<(), RuntimeError> {
        self.send(TourCommand::PartClicked { part_id }).await
    }

    pub async fn select_view(&self, view: View) -> Result<(), RuntimeError> {
        self.send(TourCommand::SelectView { view }).await
    }

    pub fn snapshot(&self) -> TourSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TourSnapshot> {
        self.snapshots.clone()
    }
}
