//! Virtual-time driver for a [`TourOrchestrator`].
//!
//! Applies the orchestrator's timer effects to a simulated clock and fires due
//! timers in deadline order, without a runtime. Used for deterministic tests
//! and for printing a tour timeline.

use std::{collections::BTreeMap, time::Duration};

use shared::domain::TimerRole;

use crate::{effect::TourEffect, orchestrator::TourOrchestrator, timer::TimerToken};

#[derive(Debug, Clone, PartialEq)]
pub struct TimedEffect {
    pub at: Duration,
    pub effect: TourEffect,
}

pub struct VirtualTour {
    orchestrator: TourOrchestrator,
    now: Duration,
    pending: BTreeMap<(Duration, u64), (TimerRole, TimerToken)>,
    seq: u64,
    log: Vec<TimedEffect>,
}

impl VirtualTour {
    pub fn new(orchestrator: TourOrchestrator) -> Self {
        Self {
            orchestrator,
            now: Duration::ZERO,
            pending: BTreeMap::new(),
            seq: 0,
            log: Vec::new(),
        }
    }

    /// Wraps `orchestrator` and calls `start()` on it.
    pub fn started(orchestrator: TourOrchestrator) -> Self {
        let mut tour = Self::new(orchestrator);
        tour.act(TourOrchestrator::start);
        tour
    }

    pub fn orchestrator(&self) -> &TourOrchestrator {
        &self.orchestrator
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn log(&self) -> &[TimedEffect] {
        &self.log
    }

    /// Pending timers as `(role, deadline)`, earliest first.
    pub fn pending_timers(&self) -> Vec<(TimerRole, Duration)> {
        self.pending
            .iter()
            .map(|((deadline, _), (role, _))| (*role, *deadline))
            .collect()
    }

    /// Runs an operation at the current instant and returns its effects.
    pub fn act(&mut self, op: impl FnOnce(&mut TourOrchestrator)) -> Vec<TourEffect> {
        op(&mut self.orchestrator);
        self.absorb()
    }

    /// Jumps to the earliest pending deadline and fires that timer.
    pub fn fire_next(&mut self) -> Option<Vec<TourEffect>> {
        let key = self.pending.keys().next().copied()?;
        let (role, token) = self.pending.remove(&key)?;
        self.now = self.now.max(key.0);
        self.orchestrator.on_timer(role, token);
        Some(self.absorb())
    }

    /// Advances the clock by `by`, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) -> Vec<TourEffect> {
        let target = self.now + by;
        let mut effects = Vec::new();
        loop {
            let Some(&(at, _)) = self.pending.keys().next() else {
                break;
            };
            if at > target {
                break;
            }
            if let Some(fired) = self.fire_next() {
                effects.extend(fired);
            }
        }
        self.now = target;
        effects
    }

    /// Fires timers until `done` holds, no timers remain, or `limit` passes.
    pub fn run_until(
        &mut self,
        limit: Duration,
        mut done: impl FnMut(&TourOrchestrator) -> bool,
    ) -> bool {
        let deadline = self.now + limit;
        while !done(&self.orchestrator) {
            let next = self.pending.keys().next().copied();
            match next {
                Some((at, _)) if at <= deadline => {
                    self.fire_next();
                }
                _ => return false,
            }
        }
        true
    }

    fn absorb(&mut self) -> Vec<TourEffect> {
        let effects = self.orchestrator.take_effects();
        for effect in &effects {
            match effect {
                TourEffect::ArmTimer { role, token, delay } => {
                    self.seq += 1;
                    self.pending
                        .insert((self.now + *delay, self.seq), (*role, *token));
                }
                TourEffect::CancelTimer { token, .. } => {
                    self.pending.retain(|_, (_, live)| *live != *token);
                }
                _ => {}
            }
            self.log.push(TimedEffect {
                at: self.now,
                effect: effect.clone(),
            });
        }
        effects
    }
}
